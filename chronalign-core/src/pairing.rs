//! Gather fields of related parameters that describe the same point in
//! time and space, for filters that combine them.

use std::collections::{BTreeMap, HashMap};

use crate::AlignError;
use crate::field::FieldRef;

/// Fields sharing one identity key, indexed by parameter name.
#[derive(Debug, Clone)]
pub struct IdentityGroup {
    /// Rendered identity, e.g. `valid_datetime=2020-01-01T00:00:00+00:00,level=850`.
    pub key: String,
    /// One field per requested parameter.
    pub fields: BTreeMap<String, FieldRef>,
}

/// Result of [`pair_by_identity`].
#[derive(Debug, Clone, Default)]
pub struct Pairing {
    /// Complete groups in order of first appearance.
    pub groups: Vec<IdentityGroup>,
    /// Fields whose parameter was not requested, in input order.
    pub passthrough: Vec<FieldRef>,
}

fn render_identity(field: &FieldRef, identity_keys: &[&str]) -> String {
    identity_keys
        .iter()
        .map(|k| match field.metadata(k) {
            Some(v) => format!("{k}={v}"),
            None => format!("{k}=<none>"),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Group fields whose `param_key` metadata is one of `params` by the values of
/// `identity_keys`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use chronalign_core::{ArrayField, pair_by_identity};
///
/// let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// let fields = vec![
///     ArrayField::new("2t", t, vec![280.0]).into_ref(),
///     ArrayField::new("2d", t, vec![275.0]).into_ref(),
///     ArrayField::new("msl", t, vec![101_325.0]).into_ref(),
/// ];
/// let p = pair_by_identity(&fields, &["2t", "2d"], "param", &["valid_datetime"]).unwrap();
/// assert_eq!(p.groups.len(), 1);
/// assert_eq!(p.passthrough.len(), 1);
/// ```
///
/// # Errors
/// - `AlignError::DuplicateField` when two fields share a parameter and an identity.
/// - `AlignError::Data` when a group lacks one of `params`.
pub fn pair_by_identity(
    fields: &[FieldRef],
    params: &[&str],
    param_key: &str,
    identity_keys: &[&str],
) -> Result<Pairing, AlignError> {
    let mut out = Pairing::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for field in fields {
        let param = field
            .metadata(param_key)
            .map(|v| v.to_string())
            .filter(|p| params.contains(&p.as_str()));
        let Some(param) = param else {
            out.passthrough.push(FieldRef::clone(field));
            continue;
        };

        let key = render_identity(field, identity_keys);
        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                index.insert(key.clone(), out.groups.len());
                out.groups.push(IdentityGroup {
                    key: key.clone(),
                    fields: BTreeMap::new(),
                });
                out.groups.len() - 1
            }
        };
        let group = &mut out.groups[slot];
        if group.fields.contains_key(&param) {
            return Err(AlignError::duplicate_field(param, key));
        }
        group.fields.insert(param, FieldRef::clone(field));
    }

    for group in &out.groups {
        if let Some(missing) = params.iter().find(|p| !group.fields.contains_key(**p)) {
            return Err(AlignError::Data(format!(
                "missing fields: {missing} for {}",
                group.key
            )));
        }
    }
    Ok(out)
}
