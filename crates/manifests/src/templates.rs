//! Built-in template source assets.
//!
//! Each asset carries one template under `templates/`. The built-in content
//! ships with the binary; a file at the same relative path in the state
//! directory overrides it on load, so operators can patch a manifest without
//! rebuilding.

use clusterforge_asset::{Asset, BoxedError, File, FileFetcher, Parents};
use clusterforge_installconfig::InstallContext;
use std::path::Path;

macro_rules! template_asset {
    ($(#[$doc:meta])* $name:ident, $asset_name:literal, $path:literal, $content:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name {
            data: Vec<u8>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    data: $content.as_bytes().to_vec(),
                }
            }
        }

        impl $name {
            /// Template bytes, built-in or overridden from disk.
            #[must_use]
            pub fn data(&self) -> &[u8] {
                &self.data
            }
        }

        impl Asset<InstallContext> for $name {
            fn name(&self) -> &'static str {
                $asset_name
            }

            fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, BoxedError> {
                let Some(file) = fetcher.fetch_exact(Path::new($path))? else {
                    return Ok(false);
                };
                self.data = file.data;
                Ok(true)
            }

            fn generate(
                &mut self,
                _ctx: &InstallContext,
                _parents: &Parents<InstallContext>,
            ) -> Result<(), BoxedError> {
                Ok(())
            }

            fn files(&self) -> Vec<File> {
                vec![File::new($path, self.data.clone())]
            }
        }
    };
}

template_asset!(
    /// ClusterRoleBinding granting the discovery role to all authenticated users.
    BindingDiscovery,
    "Binding Discovery",
    "templates/binding-discovery.yaml",
    r"apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRoleBinding
metadata:
  name: discovery
roleRef:
  apiGroup: rbac.authorization.k8s.io
  kind: ClusterRole
  name: system:discovery
subjects:
- apiGroup: rbac.authorization.k8s.io
  kind: Group
  name: system:authenticated
"
);

template_asset!(
    /// AppVersion object tracking the addon operator release.
    AppVersion,
    "App Version",
    "templates/app-version.yaml",
    r"apiVersion: addons.clusterforge.dev/v1
kind: AppVersion
metadata:
  name: addon-operator
  namespace: addon-system
spec:
  paused: false
status:
  paused: false
"
);

template_asset!(
    /// Deployment running the addon operator. The image is substituted at
    /// generation time.
    AddonOperator,
    "Addon Operator",
    "templates/addon-operator.yaml",
    r"apiVersion: apps/v1
kind: Deployment
metadata:
  name: addon-operator
  namespace: addon-system
spec:
  replicas: 1
  selector:
    matchLabels:
      k8s-app: addon-operator
  template:
    metadata:
      labels:
        k8s-app: addon-operator
    spec:
      containers:
      - name: addon-operator
        image: {{ addon_operator_image }}
        args:
        - --config=/etc/addon/config.yaml
      imagePullSecrets:
      - name: coreos-pull-secret
      nodeSelector:
        node-role.kubernetes.io/master: ''
"
);

template_asset!(
    /// ClusterRole for cluster administrators.
    RoleAdmin,
    "Role Admin",
    "templates/role-admin.yaml",
    r"apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: admin
rules:
- apiGroups:
  - '*'
  resources:
  - '*'
  verbs:
  - '*'
- nonResourceURLs:
  - '*'
  verbs:
  - '*'
"
);

template_asset!(
    /// ClusterRole for unprivileged users.
    RoleUser,
    "Role User",
    "templates/role-user.yaml",
    r"apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: user
rules:
- apiGroups:
  - ''
  resources:
  - namespaces
  verbs:
  - get
  - list
  - watch
"
);

template_asset!(
    /// ClusterRoleBinding granting admin to the addon-system service account.
    BindingAdmin,
    "Binding Admin",
    "templates/binding-admin.yaml",
    r"apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRoleBinding
metadata:
  name: admin
roleRef:
  apiGroup: rbac.authorization.k8s.io
  kind: ClusterRole
  name: admin
subjects:
- kind: ServiceAccount
  name: default
  namespace: addon-system
"
);

template_asset!(
    /// Image pull secret for the addon-system namespace. The secret payload
    /// is substituted base64-encoded at generation time.
    PullSecretTemplate,
    "Pull Secret Template",
    "templates/pull.yaml",
    r"apiVersion: v1
kind: Secret
metadata:
  name: coreos-pull-secret
  namespace: addon-system
type: kubernetes.io/dockerconfigjson
data:
  .dockerconfigjson: {{ pull_secret }}
"
);

template_asset!(
    /// Cloud credential secret. Rendered only for platforms that carry cloud
    /// credentials; the branches keep aws and openstack payloads apart.
    CloudCredsSecret,
    "Cloud Creds Secret",
    "templates/cloud-creds-secret.yaml",
    r"apiVersion: v1
kind: Secret
metadata:
  name: cloud-creds
  namespace: addon-system
type: Opaque
data:
{% if cloud_creds.aws %}  aws_access_key_id: {{ cloud_creds.aws.access_key_id }}
  aws_secret_access_key: {{ cloud_creds.aws.secret_access_key }}
{% endif %}{% if cloud_creds.openstack %}  clouds.yaml: {{ cloud_creds.openstack.clouds_yaml }}
{% endif %}"
);

template_asset!(
    /// Role and binding letting the addon operator read the cloud-creds
    /// secret.
    RoleCloudCredsSecretReader,
    "Role Cloud Creds Secret Reader",
    "templates/role-cloud-creds-secret-reader.yaml",
    r"apiVersion: rbac.authorization.k8s.io/v1
kind: Role
metadata:
  name: cloud-creds-secret-reader
  namespace: addon-system
rules:
- apiGroups:
  - ''
  resources:
  - secrets
  resourceNames:
  - cloud-creds
  verbs:
  - get
"
);

#[cfg(test)]
mod tests {
    use super::*;
    use clusterforge_asset::DiskFetcher;

    #[test]
    fn builtin_content_is_exposed_as_a_template_file() {
        let asset = RoleAdmin::default();
        let files = asset.files();
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].filename.to_string_lossy(),
            "templates/role-admin.yaml"
        );
        assert_eq!(files[0].data, asset.data());
    }

    #[test]
    fn on_disk_template_overrides_the_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("templates")).unwrap();
        std::fs::write(dir.path().join("templates/role-admin.yaml"), "patched").unwrap();

        let mut asset = RoleAdmin::default();
        let fetcher = DiskFetcher::new(dir.path());
        assert!(asset.load(&fetcher).unwrap());
        assert_eq!(asset.data(), b"patched");
    }

    #[test]
    fn missing_override_keeps_the_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let mut asset = AddonOperator::default();
        let fetcher = DiskFetcher::new(dir.path());
        assert!(!asset.load(&fetcher).unwrap());
        assert!(
            std::str::from_utf8(asset.data())
                .unwrap()
                .contains("{{ addon_operator_image }}")
        );
    }
}
