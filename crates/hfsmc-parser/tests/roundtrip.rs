//! Pretty-printing a parsed `FsmSyntax` and re-parsing the result should
//! reproduce the same tree, up to whitespace normalization.

#[test]
fn pretty_printed_turnstile_reparses_identically() {
    let source = "\
Actions:Turnstile
FSM:OneCoinTurnstile
Initial:Locked
{
  Locked Coin Unlocked {alarmOff unlock}
  Locked Pass Locked alarmOn
  Unlocked Coin Unlocked thankyou
  Unlocked Pass Locked lock
}";

    let first = hfsmc_parser::parse(source);
    assert!(first.errors.is_empty());

    let printed = first.to_string();
    let second = hfsmc_parser::parse(&printed);

    assert_eq!(first.headers, second.headers);
    assert_eq!(first.logic, second.logic);
    assert!(second.errors.is_empty());
}

#[test]
fn pretty_printed_hierarchy_reparses_identically() {
    let source = "{(base) <enter >exit e1 s a1\n s:base e1 s2 a2}";

    let first = hfsmc_parser::parse(source);
    assert!(first.errors.is_empty());

    let printed = first.to_string();
    let second = hfsmc_parser::parse(&printed);

    assert_eq!(first.headers, second.headers);
    assert_eq!(first.logic, second.logic);
}

#[test]
fn pretty_printed_null_action_placeholder_reparses_identically() {
    let source = "{i e s * s e i a1}";

    let first = hfsmc_parser::parse(source);
    assert!(first.errors.is_empty());

    let printed = first.to_string();
    let second = hfsmc_parser::parse(&printed);

    assert_eq!(first.headers, second.headers);
    assert_eq!(first.logic, second.logic);
    assert!(second.errors.is_empty());
}
