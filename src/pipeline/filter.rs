//! Free-text search and per-field constraints over the user collection.

use super::accessor::resolve;
use crate::domain::User;

/// Active search and field constraints.
///
/// All constraints are case-insensitive substring matches and are AND-combined. A
/// blank constraint (empty or whitespace only) places no restriction on its field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Matches any searchable field.
    pub search: String,
    pub name: String,
    pub email: String,
    /// Matches the organization name.
    pub company: String,
}

/// Partial filter update; `None` leaves the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl FilterPatch {
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn company(query: impl Into<String>) -> Self {
        Self {
            company: Some(query.into()),
            ..Self::default()
        }
    }

    /// Patch that blanks every constraint.
    #[must_use]
    pub fn clear_all() -> Self {
        Self {
            search: Some(String::new()),
            name: Some(String::new()),
            email: Some(String::new()),
            company: Some(String::new()),
        }
    }

    /// Patch replacing every field with the values of `spec`.
    #[must_use]
    pub fn replace_with(spec: &FilterSpec) -> Self {
        Self {
            search: Some(spec.search.clone()),
            name: Some(spec.name.clone()),
            email: Some(spec.email.clone()),
            company: Some(spec.company.clone()),
        }
    }
}

impl FilterSpec {
    /// Applies a partial update in place.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
    }

    /// True when no constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.search, &self.name, &self.email, &self.company]
            .iter()
            .all(|value| value.trim().is_empty())
    }

    /// Number of active per-field constraints (search not included).
    #[must_use]
    pub fn active_field_count(&self) -> usize {
        [&self.name, &self.email, &self.company]
            .iter()
            .filter(|value| !value.trim().is_empty())
            .count()
    }
}

/// Lowercased needles, computed once per filter pass.
struct Needles {
    search: Option<String>,
    name: Option<String>,
    email: Option<String>,
    company: Option<String>,
}

impl Needles {
    fn from_spec(spec: &FilterSpec) -> Self {
        // Whitespace only disables a constraint; otherwise the term is matched as typed.
        let needle = |value: &str| (!value.trim().is_empty()).then(|| value.to_lowercase());
        Self {
            search: needle(&spec.search),
            name: needle(&spec.name),
            email: needle(&spec.email),
            company: needle(&spec.company),
        }
    }

    fn matches(&self, user: &User) -> bool {
        let contains = |haystack: &str, needle: &str| haystack.to_lowercase().contains(needle);

        let matches_search = self.search.as_deref().map_or(true, |needle| {
            searchable_fields(user).any(|field| contains(&field, needle))
        });
        let matches_name = self
            .name
            .as_deref()
            .map_or(true, |needle| contains(&user.name, needle));
        let matches_email = self
            .email
            .as_deref()
            .map_or(true, |needle| contains(&user.email, needle));
        let matches_company = self.company.as_deref().map_or(true, |needle| {
            let organization = resolve(user, "organization.name");
            !organization.is_empty() && contains(&organization.to_text(), needle)
        });

        matches_search && matches_name && matches_email && matches_company
    }
}

/// Field values consulted by the free-text search.
fn searchable_fields(user: &User) -> impl Iterator<Item = String> + '_ {
    [
        user.id.to_string(),
        user.name.clone(),
        user.username.clone(),
        user.email.clone(),
        user.phone.clone(),
        user.website.clone(),
    ]
    .into_iter()
    .chain(user.organization_name().map(str::to_string))
}

/// Returns the records matching `spec`, in their original relative order.
///
/// The input is not modified. With no active constraint the result is a full copy.
///
/// # Examples
///
/// ```
/// use userdeck::domain::{User, UserId, UserInput};
/// use userdeck::pipeline::{filter_records, FilterSpec};
///
/// let users: Vec<User> = ["Ada", "Grace", "Adele"]
///     .iter()
///     .enumerate()
///     .map(|(i, name)| {
///         let input = UserInput { name: (*name).to_string(), ..UserInput::default() };
///         User::from_input(UserId::Number(i as i64 + 1), &input)
///     })
///     .collect();
///
/// let spec = FilterSpec { name: "AD".to_string(), ..FilterSpec::default() };
/// let names: Vec<_> = filter_records(&users, &spec).into_iter().map(|u| u.name).collect();
/// assert_eq!(names, vec!["Ada", "Adele"]);
/// ```
#[must_use]
pub fn filter_records(records: &[User], spec: &FilterSpec) -> Vec<User> {
    let _span = tracing::debug_span!(
        "filter_records",
        total = records.len(),
        search_len = spec.search.len(),
        field_constraints = spec.active_field_count()
    )
    .entered();

    let needles = Needles::from_spec(spec);
    let filtered: Vec<User> = records
        .iter()
        .filter(|user| needles.matches(user))
        .cloned()
        .collect();

    tracing::trace!(filtered = filtered.len(), "filter applied");
    filtered
}

/// Number of records matching `spec`, without copying them.
#[must_use]
pub fn count_matching(records: &[User], spec: &FilterSpec) -> usize {
    let needles = Needles::from_spec(spec);
    records.iter().filter(|user| needles.matches(user)).count()
}
