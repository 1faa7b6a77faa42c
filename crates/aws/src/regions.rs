//! The documented AWS region list.

/// Region id and location, in id order.
pub const REGIONS: [(&str, &str); 18] = [
    ("ap-northeast-1", "Tokyo"),
    ("ap-northeast-2", "Seoul"),
    ("ap-northeast-3", "Osaka-Local"),
    ("ap-south-1", "Mumbai"),
    ("ap-southeast-1", "Singapore"),
    ("ap-southeast-2", "Sydney"),
    ("ca-central-1", "Central"),
    ("cn-north-1", "Beijing"),
    ("cn-northwest-1", "Ningxia"),
    ("eu-central-1", "Frankfurt"),
    ("eu-west-1", "Ireland"),
    ("eu-west-2", "London"),
    ("eu-west-3", "Paris"),
    ("sa-east-1", "São Paulo"),
    ("us-east-1", "N. Virginia"),
    ("us-east-2", "Ohio"),
    ("us-west-1", "N. California"),
    ("us-west-2", "Oregon"),
];

/// The default region offered during installation.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Valid region ids, in id order.
#[must_use]
pub fn region_ids() -> Vec<String> {
    REGIONS.iter().map(|(id, _)| (*id).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_is_in_the_list() {
        assert!(region_ids().iter().any(|id| id == DEFAULT_REGION));
    }

    #[test]
    fn region_ids_are_sorted() {
        let ids = region_ids();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
