//! Editable drafts behind the overlays: the add/edit user form and the filter panel.
//!
//! Both drafts keep plain strings for every field plus a focused field. Nothing in
//! here touches the store; the event handler turns a finished draft into a
//! transition or a worker message.

use crate::domain::{validate_user_input, FieldErrors, Organization, User, UserId, UserInput};
use crate::pipeline::{FilterPatch, FilterSpec};
use serde_json::{Map, Value};

/// Field of the user form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Username,
    Email,
    Phone,
    Website,
    Company,
}

impl FormField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Username,
        Self::Email,
        Self::Phone,
        Self::Website,
        Self::Company,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Website => "Website",
            Self::Company => "Company",
        }
    }

    /// Key under which validation reports errors for this field.
    const fn error_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::Company => "company",
        }
    }
}

/// Moves `focus` one step through `order`, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(order: &[T], focus: T, forward: bool) -> T {
    let len = order.len();
    let index = order.iter().position(|f| *f == focus).unwrap_or(0);
    let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
    order[next]
}

/// What submitting the form does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit(UserId),
}

/// Draft of the add/edit user dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub target: FormTarget,
    name: String,
    username: String,
    email: String,
    phone: String,
    website: String,
    company: String,
    focus: FormField,
    errors: FieldErrors,
    /// Organization of the edited record, for the sub-fields the form does not show.
    organization: Option<Organization>,
    /// Unmodelled fields of the edited record.
    extra: Map<String, Value>,
}

impl UserForm {
    /// Empty form for a new user.
    #[must_use]
    pub fn create() -> Self {
        Self {
            target: FormTarget::Create,
            name: String::new(),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            company: String::new(),
            focus: FormField::Name,
            errors: FieldErrors::new(),
            organization: None,
            extra: Map::new(),
        }
    }

    /// Form prefilled from an existing user.
    #[must_use]
    pub fn edit(user: &User) -> Self {
        Self {
            target: FormTarget::Edit(user.id.clone()),
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            website: user.website.clone(),
            company: user.organization_name().unwrap_or_default().to_string(),
            organization: user.organization.clone(),
            extra: user.extra.clone(),
            ..Self::create()
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.target {
            FormTarget::Create => "Add User",
            FormTarget::Edit(_) => "Edit User",
        }
    }

    #[must_use]
    pub const fn focused(&self) -> FormField {
        self.focus
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Website => &self.website,
            FormField::Company => &self.company,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Website => &mut self.website,
            FormField::Company => &mut self.company,
        }
    }

    /// Validation message for `field` from the last submit attempt.
    #[must_use]
    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(field.error_key()).map(String::as_str)
    }

    /// Types into the focused field. Editing a field clears its error.
    pub fn push(&mut self, c: char) {
        let focus = self.focus;
        self.value_mut(focus).push(c);
        self.errors.remove(focus.error_key());
    }

    pub fn pop(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
        self.errors.remove(focus.error_key());
    }

    pub fn focus_next(&mut self) {
        self.focus = cycle(&FormField::ALL, self.focus, true);
    }

    pub fn focus_previous(&mut self) {
        self.focus = cycle(&FormField::ALL, self.focus, false);
    }

    /// Payload built from the current field values.
    ///
    /// Values are trimmed; a blank username or company is omitted. When editing, the
    /// fields the form does not show are carried over from the edited record, and a
    /// renamed company keeps its catch phrase and `bs`.
    #[must_use]
    pub fn to_input(&self) -> UserInput {
        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        let organization = optional(&self.company).map(|name| match &self.organization {
            Some(existing) => existing.renamed(name),
            None => Organization::named(name),
        });

        UserInput {
            name: self.name.trim().to_string(),
            username: optional(&self.username),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            website: self.website.trim().to_string(),
            organization,
            extra: self.extra.clone(),
        }
    }

    /// Validates the draft.
    ///
    /// Returns the payload when it is valid. Otherwise keeps the field errors for
    /// rendering, moves focus to the first invalid field and returns `None`.
    pub fn submit(&mut self) -> Option<UserInput> {
        let input = self.to_input();
        self.errors = validate_user_input(&input);

        if let Some(first) = FormField::ALL.into_iter().find(|f| self.error(*f).is_some()) {
            tracing::debug!(error_count = self.errors.len(), "form submit rejected");
            self.focus = first;
            return None;
        }
        Some(input)
    }
}

/// Field of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Name,
    Email,
    Company,
}

impl FilterField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Company];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Company => "Company",
        }
    }
}

/// Uncommitted per-field filters. Applying replaces the name, email and company
/// filters; the search box is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    name: String,
    email: String,
    company: String,
    focus: FilterField,
}

impl FilterDraft {
    /// Draft seeded with the filters currently in effect.
    #[must_use]
    pub fn from_spec(spec: &FilterSpec) -> Self {
        Self {
            name: spec.name.clone(),
            email: spec.email.clone(),
            company: spec.company.clone(),
            focus: FilterField::Name,
        }
    }

    #[must_use]
    pub const fn focused(&self) -> FilterField {
        self.focus
    }

    #[must_use]
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Name => &self.name,
            FilterField::Email => &self.email,
            FilterField::Company => &self.company,
        }
    }

    fn value_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Name => &mut self.name,
            FilterField::Email => &mut self.email,
            FilterField::Company => &mut self.company,
        }
    }

    pub fn push(&mut self, c: char) {
        let focus = self.focus;
        self.value_mut(focus).push(c);
    }

    pub fn pop(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = cycle(&FilterField::ALL, self.focus, true);
    }

    pub fn focus_previous(&mut self) {
        self.focus = cycle(&FilterField::ALL, self.focus, false);
    }

    /// Empties every field of the draft.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.company.clear();
    }

    #[must_use]
    pub fn to_patch(&self) -> FilterPatch {
        FilterPatch {
            search: None,
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            company: Some(self.company.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut UserForm, text: &str) {
        text.chars().for_each(|c| form.push(c));
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let mut form = UserForm::create();
        form.focus_next();
        form.focus_next();

        assert!(form.submit().is_none());
        assert_eq!(form.error(FormField::Name), Some("Name is required"));
        assert_eq!(form.error(FormField::Email), Some("Email is required"));
        assert_eq!(form.error(FormField::Username), None);
        assert_eq!(form.focused(), FormField::Name);
    }

    #[test]
    fn typing_clears_the_field_error() {
        let mut form = UserForm::create();
        assert!(form.submit().is_none());

        type_text(&mut form, "Ada");
        assert_eq!(form.error(FormField::Name), None);
        assert_eq!(form.error(FormField::Phone), Some("Phone is required"));
    }

    #[test]
    fn valid_form_yields_trimmed_input() {
        let mut form = UserForm::create();
        for value in [" Ada Lovelace ", "  ", "ada@example.com", "555-0100", "ada.dev", "Acme"] {
            type_text(&mut form, value);
            form.focus_next();
        }

        let input = form.submit().unwrap();
        assert_eq!(input.name, "Ada Lovelace");
        assert_eq!(input.username, None);
        assert_eq!(input.email, "ada@example.com");
        assert_eq!(input.organization, Some(Organization::named("Acme")));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let user = User::from_input(
            UserId::Number(3),
            &UserInput {
                name: "Clementine Bauch".into(),
                username: Some("Samantha".into()),
                email: "Nathan@yesenia.net".into(),
                phone: "1-463-123-4447".into(),
                website: "ramiro.info".into(),
                organization: Some(Organization::named("Romaguera-Jacobson")),
                ..UserInput::default()
            },
        );

        let mut form = UserForm::edit(&user);
        assert_eq!(form.title(), "Edit User");
        assert_eq!(form.target, FormTarget::Edit(UserId::Number(3)));
        assert_eq!(form.value(FormField::Company), "Romaguera-Jacobson");
        assert_eq!(form.submit(), Some(UserInput::from(&user)));
    }

    #[test]
    fn edit_carries_fields_the_form_does_not_show() {
        let mut user = User::from_input(
            UserId::Number(1),
            &UserInput {
                name: "Leanne Graham".into(),
                email: "Sincere@april.biz".into(),
                phone: "1-770-736-8031".into(),
                website: "hildegard.org".into(),
                organization: Some(Organization {
                    name: "Romaguera-Crona".into(),
                    catch_phrase: Some("Multi-layered client-server neural-net".into()),
                    bs: Some("harness real-time e-markets".into()),
                }),
                ..UserInput::default()
            },
        );
        user.extra.insert("address".into(), serde_json::json!({ "city": "Gwenborough" }));

        let unchanged = UserForm::edit(&user).submit().unwrap();
        assert_eq!(unchanged, UserInput::from(&user));
        assert_eq!(unchanged.extra["address"]["city"], "Gwenborough");

        let mut renamed = UserForm::edit(&user);
        while renamed.focused() != FormField::Company {
            renamed.focus_next();
        }
        "Romaguera-Crona".chars().for_each(|_| renamed.pop());
        type_text(&mut renamed, "Crona Holdings");
        let organization = renamed.submit().unwrap().organization.unwrap();
        assert_eq!(organization.name, "Crona Holdings");
        assert_eq!(organization.bs.as_deref(), Some("harness real-time e-markets"));

        "Crona Holdings".chars().for_each(|_| renamed.pop());
        assert_eq!(renamed.submit().unwrap().organization, None);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = UserForm::create();
        form.focus_previous();
        assert_eq!(form.focused(), FormField::Company);
        form.focus_next();
        assert_eq!(form.focused(), FormField::Name);
    }

    #[test]
    fn filter_draft_round_trips_spec_without_touching_search() {
        let spec = FilterSpec {
            search: "leanne".into(),
            company: "Acme".into(),
            ..FilterSpec::default()
        };
        let mut draft = FilterDraft::from_spec(&spec);
        assert_eq!(draft.value(FilterField::Company), "Acme");

        draft.focus_next();
        "april".chars().for_each(|c| draft.push(c));
        let patch = draft.to_patch();
        assert_eq!(patch.search, None);
        assert_eq!(patch.email.as_deref(), Some("april"));

        draft.clear();
        assert_eq!(draft.to_patch().company.as_deref(), Some(""));
    }
}
