use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use onboard::models::{FieldConfig, FieldKind, FieldValue, FormDefinition};
use onboard::tui::{FieldPresenter, FormDelegate, FormState};
use onboard::validation::Rules;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn two_field_form() -> FormState {
    FormState::new(FormDefinition {
        title: Some("Signup".to_string()),
        fields: vec![
            FieldConfig::new("name", FieldKind::Name, "Name?"),
            FieldConfig::new("email", FieldKind::Email, "Email?"),
        ],
    })
    .unwrap()
}

/// Walks a field: configure, activate, type, deactivate, advance.
fn complete_step(presenter: &mut FieldPresenter, form: &mut FormState, text: &str) {
    let field = form.current_field().clone();
    presenter.configure(&field, form);
    presenter.activate(form);
    for c in text.chars() {
        presenter.handle_input(press(KeyCode::Char(c)), form);
    }
    assert!(form.ready, "'{text}' should make the field ready");
    presenter.deactivate(form);
    assert!(form.advance());
}

#[test]
fn test_full_walkthrough_captures_all_values() {
    let mut presenter = FieldPresenter::with_cached_country(Rules::new().unwrap(), None);
    let mut form = two_field_form();

    complete_step(&mut presenter, &mut form, "Jane");
    complete_step(&mut presenter, &mut form, "jane@example.io");

    assert!(form.completed);
    assert_eq!(
        form.value_for("name"),
        Some(&FieldValue::Text("Jane".to_string()))
    );
    assert_eq!(
        form.value_for("email"),
        Some(&FieldValue::Text("jane@example.io".to_string()))
    );
}

#[test]
fn test_advance_blocked_until_ready() {
    let mut presenter = FieldPresenter::with_cached_country(Rules::new().unwrap(), None);
    let mut form = two_field_form();

    let field = form.current_field().clone();
    presenter.configure(&field, &form);
    presenter.activate(&mut form);
    assert!(!form.ready);
    assert!(!form.advance());
    assert_eq!(form.current, 0);

    presenter.handle_input(press(KeyCode::Char('J')), &mut form);
    assert!(form.advance());
    assert_eq!(form.current, 1);
}

#[test]
fn test_retreat_and_revisit_restores_answer() {
    let mut presenter = FieldPresenter::with_cached_country(Rules::new().unwrap(), None);
    let mut form = two_field_form();

    complete_step(&mut presenter, &mut form, "Jane");
    assert_eq!(form.current, 1);

    // Step back without touching the second field
    presenter.reset();
    assert!(form.retreat());

    let field = form.current_field().clone();
    presenter.configure(&field, &form);
    assert_eq!(presenter.text_input.text(), "Jane");
    presenter.activate(&mut form);
    assert!(form.ready);
}

#[test]
fn test_deactivation_pushes_value_even_when_not_ready() {
    let mut presenter = FieldPresenter::with_cached_country(Rules::new().unwrap(), None);
    let mut form = FormState::new(FormDefinition {
        title: None,
        fields: vec![FieldConfig::new("username", FieldKind::Username, "User?")],
    })
    .unwrap();

    let field = form.current_field().clone();
    presenter.configure(&field, &form);
    presenter.activate(&mut form);
    // "ab" is too short to be ready, but the partial value still reaches
    // the host on deactivation
    presenter.handle_input(press(KeyCode::Char('a')), &mut form);
    presenter.handle_input(press(KeyCode::Char('b')), &mut form);
    presenter.deactivate(&mut form);

    assert!(!form.ready);
    assert_eq!(
        form.value_for("username"),
        Some(&FieldValue::Text("ab".to_string()))
    );
}
