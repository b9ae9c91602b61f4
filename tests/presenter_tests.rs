use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use onboard::models::{
    CodeFieldConfig, DateFieldConfig, FieldConfig, FieldKind, FieldValue, FormDefinition,
    SelectFieldConfig, SelectOption,
};
use onboard::tui::{FieldPresenter, FormDelegate, FormState, PresenterPhase};
use onboard::validation::Rules;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn presenter() -> FieldPresenter {
    FieldPresenter::with_cached_country(Rules::new().unwrap(), None)
}

fn form_with(fields: Vec<FieldConfig>) -> FormState {
    FormState::new(FormDefinition {
        title: None,
        fields,
    })
    .unwrap()
}

/// Delegate that records every push, to observe redundant updates.
#[derive(Default)]
struct Recorder {
    ready: Vec<bool>,
    values: Vec<(String, FieldValue)>,
}

impl FormDelegate for Recorder {
    fn set_ready(&mut self, ready: bool) {
        self.ready.push(ready);
    }

    fn set_value(&mut self, key: &str, value: FieldValue) {
        self.values.push((key.to_string(), value));
    }

    fn value_for(&self, _key: &str) -> Option<&FieldValue> {
        None
    }
}

fn date_field() -> FieldConfig {
    FieldConfig::new(
        "birthday",
        FieldKind::Date(DateFieldConfig {
            min: None,
            max: None,
            default: chrono::NaiveDate::from_ymd_opt(1995, 6, 15),
        }),
        "Birthday?",
    )
}

fn select_field(multiple: bool) -> FieldConfig {
    FieldConfig::new(
        "pick",
        FieldKind::Select(SelectFieldConfig {
            options: vec![
                SelectOption::new("a", "A"),
                SelectOption::new("b", "B"),
                SelectOption::new("c", "C"),
            ],
            multiple,
            min_selection: None,
            max_selection: None,
        }),
        "Pick?",
    )
}

#[test]
fn test_recycle_date_to_select_leaves_no_date_state() {
    let mut presenter = presenter();
    let form = form_with(vec![date_field(), select_field(false)]);

    presenter.configure(&date_field(), &form);
    assert!(presenter.date_picker.is_some());
    assert_eq!(presenter.phase, PresenterPhase::Configured);

    // Recycle for a different field
    presenter.reset();
    assert_eq!(presenter.phase, PresenterPhase::Idle);
    assert!(presenter.date_picker.is_none());
    assert!(presenter.config.is_none());

    presenter.configure(&select_field(false), &form);
    assert!(presenter.date_picker.is_none());
    assert!(presenter.select_list.is_some());
}

#[test]
fn test_reset_clears_text_between_text_fields() {
    let mut presenter = presenter();
    let mut recorder = Recorder::default();
    let form = form_with(vec![FieldConfig::new("name", FieldKind::Name, "Name?")]);

    presenter.configure(&FieldConfig::new("name", FieldKind::Name, "Name?"), &form);
    presenter.activate(&mut recorder);
    presenter.handle_input(press(KeyCode::Char('J')), &mut recorder);
    assert_eq!(presenter.text_input.text(), "J");

    presenter.reset();
    presenter.configure(
        &FieldConfig::new("email", FieldKind::Email, "Email?"),
        &form,
    );
    assert_eq!(presenter.text_input.text(), "");
}

#[test]
fn test_code_entry_ready_progression_and_overflow() {
    let mut presenter = presenter();
    let mut recorder = Recorder::default();
    let field = FieldConfig::new(
        "code",
        FieldKind::VerificationCode(CodeFieldConfig { length: 6 }),
        "Code?",
    );
    let form = form_with(vec![field.clone()]);

    presenter.configure(&field, &form);
    presenter.activate(&mut recorder);

    for (i, digit) in "123456".chars().enumerate() {
        presenter.handle_input(press(KeyCode::Char(digit)), &mut recorder);
        let expected = i == 5;
        assert_eq!(
            recorder.ready.last().copied(),
            Some(expected),
            "after digit {}",
            i + 1
        );
    }

    // A seventh digit is rejected at entry time: text unchanged, still ready
    presenter.handle_input(press(KeyCode::Char('7')), &mut recorder);
    assert_eq!(presenter.code_input.as_ref().unwrap().digits, "123456");
    assert_eq!(recorder.ready.last().copied(), Some(true));
}

#[test]
fn test_single_select_b_replaces_a() {
    let mut presenter = presenter();
    let field = select_field(false);
    let mut form = form_with(vec![field.clone()]);

    presenter.configure(&field, &form);
    presenter.activate(&mut form);
    assert!(!form.ready);

    presenter.handle_input(press(KeyCode::Enter), &mut form); // select A
    assert_eq!(
        form.value_for("pick"),
        Some(&FieldValue::SingleSelect {
            id: "a".to_string(),
            label: "A".to_string()
        })
    );

    presenter.handle_input(press(KeyCode::Down), &mut form);
    presenter.handle_input(press(KeyCode::Enter), &mut form); // select B
    assert_eq!(
        form.value_for("pick"),
        Some(&FieldValue::SingleSelect {
            id: "b".to_string(),
            label: "B".to_string()
        })
    );
    assert!(form.ready);
}

#[test]
fn test_multi_select_accumulates_and_empties() {
    let mut presenter = presenter();
    let field = select_field(true);
    let mut form = form_with(vec![field.clone()]);

    presenter.configure(&field, &form);
    presenter.activate(&mut form);

    presenter.handle_input(press(KeyCode::Enter), &mut form); // check A
    presenter.handle_input(press(KeyCode::Down), &mut form);
    presenter.handle_input(press(KeyCode::Enter), &mut form); // check B
    match form.value_for("pick") {
        Some(FieldValue::MultiSelect(map)) => {
            assert_eq!(map.len(), 2);
            assert!(map.contains_key("a") && map.contains_key("b"));
        }
        other => panic!("Expected multi-select value, got {other:?}"),
    }

    presenter.handle_input(press(KeyCode::Up), &mut form);
    presenter.handle_input(press(KeyCode::Enter), &mut form); // uncheck A
    match form.value_for("pick") {
        Some(FieldValue::MultiSelect(map)) => {
            assert_eq!(map.len(), 1);
            assert!(map.contains_key("b"));
        }
        other => panic!("Expected multi-select value, got {other:?}"),
    }
    assert!(form.ready);

    presenter.handle_input(press(KeyCode::Down), &mut form);
    presenter.handle_input(press(KeyCode::Enter), &mut form); // uncheck B
    assert!(!form.ready);
}

#[test]
fn test_every_edit_pushes_even_when_unchanged() {
    let mut presenter = presenter();
    let mut recorder = Recorder::default();
    let field = FieldConfig::new("name", FieldKind::Name, "Name?");
    let form = form_with(vec![field.clone()]);

    presenter.configure(&field, &form);
    presenter.activate(&mut recorder);
    let after_activate = recorder.ready.len();
    assert!(after_activate >= 1);

    // An arrow key changes nothing, the push still happens
    presenter.handle_input(press(KeyCode::Left), &mut recorder);
    assert_eq!(recorder.ready.len(), after_activate + 1);
}

#[test]
fn test_focus_deferred_until_tick_readiness_immediate() {
    let mut presenter = presenter();
    let mut recorder = Recorder::default();
    let field = FieldConfig::new("name", FieldKind::Name, "Name?");
    let form = form_with(vec![field.clone()]);

    presenter.configure(&field, &form);
    presenter.activate(&mut recorder);

    // Readiness was pushed synchronously, focus has not landed yet
    assert!(!recorder.ready.is_empty());
    assert!(!presenter.focused);

    presenter.tick();
    assert!(presenter.focused);
}

#[test]
fn test_round_trip_restores_value_and_readiness() {
    let mut presenter = presenter();
    let field = FieldConfig::new("username", FieldKind::Username, "Username?");
    let mut form = form_with(vec![field.clone()]);

    // First visit: type a valid username and move on
    presenter.configure(&field, &form);
    presenter.activate(&mut form);
    for c in "jane_doe".chars() {
        presenter.handle_input(press(KeyCode::Char(c)), &mut form);
    }
    assert!(form.ready);
    presenter.deactivate(&mut form);
    assert_eq!(presenter.phase, PresenterPhase::Idle);

    // Revisit: the stored value repopulates the control and readiness
    // matches fresh validation of that value
    presenter.configure(&field, &form);
    assert_eq!(presenter.text_input.text(), "jane_doe");
    presenter.activate(&mut form);
    assert!(form.ready);
}

#[test]
fn test_phone_restore_strips_prefix() {
    let mut presenter = presenter();
    let field = FieldConfig::new("phone", FieldKind::Phone, "Phone?");
    let mut form = form_with(vec![field.clone()]);

    form.set_value("phone", FieldValue::Text("+1555012345".to_string()));
    presenter.configure(&field, &form);
    assert_eq!(presenter.text_input.text(), "555012345");
    presenter.activate(&mut form);
    assert!(form.ready);
}

#[test]
fn test_inactive_presenter_ignores_input() {
    let mut presenter = presenter();
    let mut recorder = Recorder::default();
    let field = FieldConfig::new("name", FieldKind::Name, "Name?");
    let form = form_with(vec![field.clone()]);

    presenter.configure(&field, &form);
    // Not activated: keystrokes must not reach the buffer
    let event = presenter.handle_input(press(KeyCode::Char('x')), &mut recorder);
    assert!(event.is_none());
    assert_eq!(presenter.text_input.text(), "");
    assert!(recorder.ready.is_empty());
}
