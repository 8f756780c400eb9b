use chrono::NaiveDate;

/// Optional constraints narrowing a file listing query. Absent fields impose
/// no constraint.
///
/// The List Controller keeps two independent copies: the one being edited
/// and the one driving the active query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Substring match on the original filename.
    pub search: Option<String>,
    /// MIME type match.
    pub file_type: Option<String>,
    /// Lower size bound in bytes.
    pub min_size: Option<u64>,
    /// Upper size bound in bytes.
    pub max_size: Option<u64>,
    pub min_uploaded_at: Option<NaiveDate>,
    pub max_uploaded_at: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Serializes the defined, non-empty fields as query parameters.
    ///
    /// The field order is fixed (alphabetical), which makes the output a
    /// canonical serialization: criteria holding the same values always
    /// produce the same pairs, independent of how they were built.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref file_type) = self.file_type {
            if !file_type.is_empty() {
                pairs.push(("file_type", file_type.clone()));
            }
        }
        if let Some(max_size) = self.max_size {
            pairs.push(("max_size", max_size.to_string()));
        }
        if let Some(max_uploaded_at) = self.max_uploaded_at {
            pairs.push(("max_uploaded_at", max_uploaded_at.to_string()));
        }
        if let Some(min_size) = self.min_size {
            pairs.push(("min_size", min_size.to_string()));
        }
        if let Some(min_uploaded_at) = self.min_uploaded_at {
            pairs.push(("min_uploaded_at", min_uploaded_at.to_string()));
        }
        if let Some(ref search) = self.search {
            if !search.is_empty() {
                pairs.push(("search", search.clone()));
            }
        }
        pairs
    }

    /// Cache key for the query these criteria drive. Criteria that serialize
    /// to the same parameters share a key; empty criteria key to `""`.
    pub fn cache_key(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_serialize_to_no_parameters() {
        let criteria = FilterCriteria::default();
        assert!(criteria.query_pairs().is_empty());
        assert_eq!(criteria.cache_key(), "");
    }

    #[test]
    fn blank_strings_count_as_undefined() {
        let criteria = FilterCriteria {
            search: Some(String::new()),
            file_type: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.query_pairs().is_empty());
        assert_eq!(criteria.cache_key(), FilterCriteria::default().cache_key());
    }

    #[test]
    fn equivalent_criteria_share_a_cache_key() {
        let a = FilterCriteria {
            search: Some("report".to_string()),
            file_type: Some(String::new()),
            min_size: Some(1024),
            ..Default::default()
        };
        let b = FilterCriteria {
            search: Some("report".to_string()),
            file_type: None,
            min_size: Some(1024),
            ..Default::default()
        };
        assert_eq!(a.cache_key(), b.cache_key());
        assert!(!a.cache_key().is_empty());
    }

    #[test]
    fn distinct_criteria_get_distinct_keys() {
        let a = FilterCriteria {
            search: Some("report".to_string()),
            ..Default::default()
        };
        let b = FilterCriteria {
            search: Some("invoice".to_string()),
            ..Default::default()
        };
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn pairs_follow_a_fixed_field_order() {
        let criteria = FilterCriteria {
            search: Some("a".to_string()),
            file_type: Some("text/plain".to_string()),
            min_size: Some(1),
            max_size: Some(2),
            min_uploaded_at: NaiveDate::from_ymd_opt(2026, 1, 2),
            max_uploaded_at: NaiveDate::from_ymd_opt(2026, 3, 4),
        };
        let names: Vec<&str> = criteria.query_pairs().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "file_type",
                "max_size",
                "max_uploaded_at",
                "min_size",
                "min_uploaded_at",
                "search"
            ]
        );
    }

    #[test]
    fn dates_serialize_as_iso_days() {
        let criteria = FilterCriteria {
            min_uploaded_at: NaiveDate::from_ymd_opt(2026, 8, 30),
            ..Default::default()
        };
        assert_eq!(
            criteria.query_pairs(),
            vec![("min_uploaded_at", "2026-08-30".to_string())]
        );
    }
}
