mod common;

use cohort_core::checker::{check_satisfaction, mandatory_only, BALANCE_EPSILON};
use cohort_core::model::{Constraint, EnumMode};
use common::*;

#[test]
fn epsilon_absorbs_mild_imbalance() {
    let attributes = vec![enum_attribute("gender", "Gender", &["F", "M"])];
    let elements = vec![
        element("e1").text("gender", "F").build(),
        element("e2").text("gender", "F").build(),
        element("e3").text("gender", "F").build(),
    ];
    // Counts [2, 1]: mean 1.5, divergence 1/3. Budget 0.25 is exceeded,
    // but stays inside the 0.125 epsilon.
    let groups = vec![group("g1", &["e1", "e2"]), group("g2", &["e3"])];
    let constraints = vec![Constraint::Enum {
        attribute_id: "gender".to_string(),
        mode: EnumMode::Balance {
            allowed_divergence: 0.25,
        },
    }];

    let result = check_satisfaction(&groups, &elements, &constraints, &attributes);
    assert!(result.satisfied, "issues: {:?}", result.issues);
}

#[test]
fn strong_imbalance_is_flagged() {
    let attributes = vec![enum_attribute("gender", "Gender", &["F", "M"])];
    let elements = vec![
        element("e1").text("gender", "F").build(),
        element("e2").text("gender", "F").build(),
        element("e3").text("gender", "F").build(),
    ];
    // Counts [3, 0]: divergence 1.0 > 0.25 + 0.125.
    let groups = vec![group("g1", &["e1", "e2", "e3"]), group("g2", &[])];
    let constraints = vec![Constraint::Enum {
        attribute_id: "gender".to_string(),
        mode: EnumMode::Balance {
            allowed_divergence: 0.25,
        },
    }];

    let result = check_satisfaction(&groups, &elements, &constraints, &attributes);
    assert!(!result.satisfied);
    assert_eq!(result.issues.len(), 1);
    assert!(result.issues[0].contains("Gender"));
}

#[test]
fn exclude_flags_mixed_groups() {
    let attributes = vec![enum_attribute("class", "Class", &["x", "y"])];
    let elements = vec![
        element("e1").text("class", "x").build(),
        element("e2").text("class", "y").build(),
    ];
    let groups = vec![group("g1", &["e1", "e2"])];
    let constraints = vec![Constraint::Enum {
        attribute_id: "class".to_string(),
        mode: EnumMode::Exclude { mandatory: false },
    }];

    let result = check_satisfaction(&groups, &elements, &constraints, &attributes);
    assert!(!result.satisfied);
    assert!(result.issues[0].contains("g1"));
    assert!(result.issues[0].contains("Class"));
}

#[test]
fn attractive_flags_split_values() {
    let attributes = vec![attractive_attribute("team", "Team")];
    let elements = vec![
        element("e1").text("team", "A").build(),
        element("e2").text("team", "A").build(),
    ];
    let groups = vec![group("g1", &["e1"]), group("g2", &["e2"])];
    let constraints = vec![Constraint::Attractive {
        attribute_id: "team".to_string(),
        mandatory: false,
    }];

    let result = check_satisfaction(&groups, &elements, &constraints, &attributes);
    assert!(!result.satisfied);
    assert!(result.issues[0].contains("'A'"));
    assert!(result.issues[0].contains("2 different groups"));
}

#[test]
fn repulsive_flags_duplicates() {
    let attributes = vec![repulsive_attribute("loud", "Loud")];
    let elements = vec![
        element("e1").flag("loud").build(),
        element("e2").flag("loud").build(),
    ];
    let groups = vec![group("g1", &["e1", "e2"])];
    let constraints = vec![Constraint::Repulsive {
        attribute_id: "loud".to_string(),
        mandatory: false,
    }];

    let result = check_satisfaction(&groups, &elements, &constraints, &attributes);
    assert!(!result.satisfied);
    assert!(result.issues[0].contains("Loud"));
    assert!(result.issues[0].contains("2 times"));
}

#[test]
fn number_check_uses_epsilon() {
    let attributes = vec![number_attribute("score", "Score")];
    let elements = vec![
        element("e1").num("score", 10.0).build(),
        element("e2").num("score", 12.0).build(),
    ];
    // Means 10 and 12 around 11: divergence ~0.09, inside 0.0 + 0.125.
    let groups = vec![group("g1", &["e1"]), group("g2", &["e2"])];
    let constraints = vec![Constraint::Number {
        attribute_id: "score".to_string(),
        balance_average: true,
        allowed_divergence: 0.0,
    }];

    let result = check_satisfaction(&groups, &elements, &constraints, &attributes);
    assert!(result.satisfied, "issues: {:?}", result.issues);

    // Push the spread past the epsilon.
    let elements = vec![
        element("e1").num("score", 10.0).build(),
        element("e2").num("score", 20.0).build(),
    ];
    let result = check_satisfaction(&groups, &elements, &constraints, &attributes);
    assert!(!result.satisfied);
}

#[test]
fn size_flag_suppressed_on_level_equality() {
    let elements = vec![
        element("e1").build(),
        element("e2").build(),
        element("e3").build(),
    ];
    // Sizes [2, 1] of 3 elements: divergence 1/3, above the 0.2 budget,
    // but 1/3 and 0.2 both round to the same tolerance level.
    let groups = vec![group("g1", &["e1", "e2"]), group("g2", &["e3"])];
    let constraints = vec![Constraint::Default {
        balance_group_sizes: true,
        allowed_divergence: 0.2,
    }];

    let result = check_satisfaction(&groups, &elements, &constraints, &[]);
    assert!(result.satisfied, "issues: {:?}", result.issues);
}

#[test]
fn size_flag_raised_on_level_difference() {
    let elements = vec![
        element("e1").build(),
        element("e2").build(),
        element("e3").build(),
    ];
    // Sizes [3, 0]: divergence 1.0, budget 0.1; levels differ.
    let groups = vec![group("g1", &["e1", "e2", "e3"]), group("g2", &[])];
    let constraints = vec![Constraint::Default {
        balance_group_sizes: true,
        allowed_divergence: 0.1,
    }];

    let result = check_satisfaction(&groups, &elements, &constraints, &[]);
    assert!(!result.satisfied);
    assert!(result.issues[0].contains("Group sizes"));
}

#[test]
fn mandatory_constraints_are_also_checked() {
    let attributes = vec![attractive_attribute("team", "Team")];
    let elements = vec![
        element("e1").text("team", "A").build(),
        element("e2").text("team", "A").build(),
    ];
    let groups = vec![group("g1", &["e1"]), group("g2", &["e2"])];
    let constraints = vec![Constraint::Attractive {
        attribute_id: "team".to_string(),
        mandatory: true,
    }];

    // Manual moves are never blocked, only diagnosed.
    let result = check_satisfaction(&groups, &elements, &constraints, &attributes);
    assert!(!result.satisfied);
}

#[test]
fn mandatory_only_filters_soft_constraints() {
    let constraints = vec![
        Constraint::Attractive {
            attribute_id: "a".to_string(),
            mandatory: true,
        },
        Constraint::Attractive {
            attribute_id: "b".to_string(),
            mandatory: false,
        },
        Constraint::Default {
            balance_group_sizes: true,
            allowed_divergence: 0.5,
        },
    ];
    let mandatory = mandatory_only(&constraints);
    assert_eq!(mandatory.len(), 1);
    assert_eq!(mandatory[0].attribute_id(), Some("a"));
}

#[test]
fn epsilon_is_an_eighth() {
    // The widened tolerance the balance checks rely on.
    assert_eq!(BALANCE_EPSILON, 0.125);
}
