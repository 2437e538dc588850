//! Best-effort detection of collections built with different identity schemes.

use crate::error::IncomparableInputError;
use crate::model::PortCollection;
use std::collections::{HashMap, HashSet};

/// Check that two collections can be compared key by key.
///
/// Fails when both declare different identity schemes, or when they share
/// no owner exactly but do share one after trimming and ASCII case folding.
pub fn check_comparable(
    base: &PortCollection,
    candidate: &PortCollection,
) -> Result<(), IncomparableInputError> {
    let incomparable = |reason: String| IncomparableInputError {
        base_label: base.label().to_string(),
        candidate_label: candidate.label().to_string(),
        reason,
    };

    if let (Some(a), Some(b)) = (
        base.explicit_identity_scheme(),
        candidate.explicit_identity_scheme(),
    ) {
        if a != b {
            return Err(incomparable(format!(
                "identity schemes differ ('{a}' vs '{b}')"
            )));
        }
    }

    if base.is_empty() || candidate.is_empty() {
        return Ok(());
    }

    let base_owners = base.owners();
    let candidate_owners = candidate.owners();
    let exact: HashSet<&str> = candidate_owners.iter().map(|o| o.as_str()).collect();
    if base_owners.iter().any(|o| exact.contains(o.as_str())) {
        return Ok(());
    }

    let folded: HashMap<String, &str> = candidate_owners
        .iter()
        .map(|o| (o.folded(), o.as_str()))
        .collect();
    for owner in &base_owners {
        if let Some(other) = folded.get(&owner.folded()) {
            return Err(incomparable(format!(
                "no SWC names match exactly, but '{owner}' and '{other}' differ only \
                 by case or whitespace"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortRecord;

    fn collection(label: &str, scheme: Option<&str>, owners: &[&str]) -> PortCollection {
        let mut builder = PortCollection::builder(label);
        if let Some(scheme) = scheme {
            builder = builder.identity_scheme(scheme);
        }
        builder.extend(owners.iter().map(|o| PortRecord::new(*o, "Port").unwrap()));
        builder.build()
    }

    #[test]
    fn test_same_owners_are_comparable() {
        let a = collection("a", None, &["Diag", "Com"]);
        let b = collection("b", None, &["Diag"]);
        assert!(check_comparable(&a, &b).is_ok());
    }

    #[test]
    fn test_disjoint_owners_are_comparable() {
        let a = collection("a", None, &["Diag"]);
        let b = collection("b", None, &["Com"]);
        assert!(check_comparable(&a, &b).is_ok());
    }

    #[test]
    fn test_case_only_overlap_is_incomparable() {
        let a = collection("a", None, &["Diag", "Com"]);
        let b = collection("b", None, &["DIAG"]);
        let err = check_comparable(&a, &b).unwrap_err();
        assert!(err.reason.contains("'Diag' and 'DIAG'"), "{}", err.reason);
        assert_eq!(err.base_label, "a");
    }

    #[test]
    fn test_explicit_schemes_must_agree() {
        let a = collection("a", Some("swc-name/port-name"), &["Diag"]);
        let b = collection("b", Some("swc-path/port-name"), &["Diag"]);
        assert!(check_comparable(&a, &b).is_err());

        let implicit = collection("c", None, &["Diag"]);
        assert!(check_comparable(&a, &implicit).is_ok());
    }

    #[test]
    fn test_empty_side_is_comparable() {
        let a = collection("a", None, &[]);
        let b = collection("b", None, &["DIAG"]);
        assert!(check_comparable(&a, &b).is_ok());
    }
}
