//! Ordering of the user collection by a field path.

use super::accessor::resolve;
use crate::domain::User;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header glyph for the column currently sorted in this direction.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Active sort key and direction. A `None` key keeps input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Spec produced by clicking the column header for `key`.
    ///
    /// Clicking the column already sorted ascending flips it to descending. Any other
    /// click (a different column, or the active column while descending) sorts
    /// ascending by `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use userdeck::pipeline::{SortDirection, SortSpec};
    ///
    /// let first = SortSpec::default().toggled("name");
    /// assert_eq!(first, SortSpec::by("name", SortDirection::Ascending));
    ///
    /// let second = first.toggled("name");
    /// assert_eq!(second, SortSpec::by("name", SortDirection::Descending));
    /// ```
    #[must_use]
    pub fn toggled(&self, key: &str) -> Self {
        let direction = match (&self.key, self.direction) {
            (Some(active), SortDirection::Ascending) if active == key => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        Self::by(key, direction)
    }

    /// Direction applied to `key`, or `None` when the collection is not sorted by it.
    #[must_use]
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }
}

/// Returns `records` ordered by `spec`.
///
/// Sorting is stable in both directions: descending reverses the comparison, not the
/// output, so records with equal keys keep their input order.
#[must_use]
pub fn sort_records(records: &[User], spec: &SortSpec) -> Vec<User> {
    let Some(key) = spec.key.as_deref() else {
        return records.to_vec();
    };

    let _span = tracing::debug_span!("sort_records", key, direction = ?spec.direction, total = records.len())
        .entered();

    // Resolve each key once instead of on every comparison.
    let mut keyed: Vec<_> = records
        .iter()
        .map(|user| (resolve(user, key), user.clone()))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare(a, b, spec.direction));
    keyed.into_iter().map(|(_, user)| user).collect()
}

fn compare<T: Ord>(a: &T, b: &T, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => b.cmp(a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Organization, UserId, UserInput};

    fn user(id: i64, name: &str, company: Option<&str>) -> User {
        let mut user = User::from_input(UserId::Number(id), &UserInput {
            name: name.into(),
            ..UserInput::default()
        });
        user.organization = company.map(Organization::named);
        user
    }

    fn ids(users: &[User]) -> Vec<String> {
        users.iter().map(|u| u.id.to_string()).collect()
    }

    #[test]
    fn unset_key_preserves_order() {
        let users = vec![user(3, "c", None), user(1, "a", None), user(2, "b", None)];
        assert_eq!(sort_records(&users, &SortSpec::default()), users);

        let descending_without_key = SortSpec {
            key: None,
            direction: SortDirection::Descending,
        };
        assert_eq!(sort_records(&users, &descending_without_key), users);
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        let users = vec![user(10, "x", None), user(9, "y", None), user(100, "z", None)];
        let sorted = sort_records(&users, &SortSpec::by("id", SortDirection::Ascending));
        assert_eq!(ids(&sorted), vec!["9", "10", "100"]);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let users = vec![
            user(1, "Dup", None),
            user(2, "Alpha", None),
            user(3, "Dup", None),
            user(4, "Zed", None),
            user(5, "Dup", None),
        ];

        let ascending = sort_records(&users, &SortSpec::by("name", SortDirection::Ascending));
        assert_eq!(ids(&ascending), vec!["2", "1", "3", "5", "4"]);

        let descending = sort_records(&users, &SortSpec::by("name", SortDirection::Descending));
        assert_eq!(ids(&descending), vec!["4", "1", "3", "5", "2"]);
    }

    #[test]
    fn resorting_is_a_fixed_point() {
        let users = vec![
            user(1, "b", Some("Zeta")),
            user(2, "a", None),
            user(3, "c", Some("Acme")),
            user(4, "a", Some("Acme")),
        ];
        for key in ["name", "company.name", "id", "address.city"] {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let spec = SortSpec::by(key, direction);
                let once = sort_records(&users, &spec);
                assert_eq!(sort_records(&once, &spec), once, "{key} {direction:?}");
            }
        }
    }

    #[test]
    fn descending_reverses_distinct_keys() {
        let users = vec![user(2, "Mia", None), user(1, "Ann", None), user(3, "Zoe", None)];
        let ascending = sort_records(&users, &SortSpec::by("name", SortDirection::Ascending));
        let mut descending = sort_records(&users, &SortSpec::by("name", SortDirection::Descending));
        descending.reverse();
        assert_eq!(ascending, descending);
    }

    #[test]
    fn missing_organization_sorts_first_ascending() {
        let users = vec![user(1, "a", Some("Beta")), user(2, "b", None), user(3, "c", Some("Alpha"))];
        let sorted = sort_records(&users, &SortSpec::by("company.name", SortDirection::Ascending));
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn header_click_toggles_direction() {
        let spec = SortSpec::default().toggled("name");
        assert_eq!(spec.direction_for("name"), Some(SortDirection::Ascending));

        let spec = spec.toggled("name");
        assert_eq!(spec.key.as_deref(), Some("name"));
        assert_eq!(spec.direction, SortDirection::Descending);

        let spec = spec.toggled("name");
        assert_eq!(spec.direction, SortDirection::Ascending);

        let spec = SortSpec::by("name", SortDirection::Descending).toggled("email");
        assert_eq!(spec, SortSpec::by("email", SortDirection::Ascending));
        assert_eq!(spec.direction_for("name"), None);
    }
}
