mod common;

use cohort_core::api::{generate, GenerateOptions};
use cohort_core::distributor::improve_by_swaps;
use cohort_core::model::{Constraint, Element, EnumMode, Group};
use cohort_core::scorer::global_penalty;
use common::*;
use fastrand::Rng;
use proptest::prelude::*;

fn roster(element_count: usize) -> Vec<Element> {
    let genders = ["F", "M"];
    let teams = ["A", "B", "C", "D"];
    (0..element_count)
        .map(|i| {
            element(&format!("e{}", i))
                .text("gender", genders[i % 2])
                .text("team", teams[i % 4])
                .build()
        })
        .collect()
}

fn soft_constraints() -> Vec<Constraint> {
    vec![
        Constraint::Enum {
            attribute_id: "gender".to_string(),
            mode: EnumMode::Balance {
                allowed_divergence: 0.25,
            },
        },
        Constraint::Attractive {
            attribute_id: "team".to_string(),
            mandatory: false,
        },
        Constraint::Default {
            balance_group_sizes: true,
            allowed_divergence: 0.2,
        },
    ]
}

fn deal(elements: &[Element], group_count: usize) -> Vec<Group> {
    let mut groups: Vec<Group> = (1..=group_count)
        .map(|i| group(&format!("g{}", i), &[]))
        .collect();
    for (i, element) in elements.iter().enumerate() {
        groups[i % group_count].members.push(element.id.clone());
    }
    groups
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn swap_search_is_monotone(
        seed in any::<u64>(),
        element_count in 4usize..24,
        group_count in 2usize..5,
        num_swaps in 0usize..400,
    ) {
        let attributes = vec![
            enum_attribute("gender", "Gender", &["F", "M"]),
            attractive_attribute("team", "Team"),
        ];
        let elements = roster(element_count);
        let constraints = soft_constraints();
        let groups = deal(&elements, group_count);

        let before = global_penalty(&groups, &elements, &constraints, &attributes);
        let mut rng = Rng::with_seed(seed);
        let result = improve_by_swaps(&groups, &elements, &constraints, &attributes, num_swaps, &mut rng);
        let after = global_penalty(&result, &elements, &constraints, &attributes);

        prop_assert!(after <= before + 1e-12, "penalty rose from {} to {}", before, after);
        // Swaps exchange members: the grouping stays a permutation.
        prop_assert_eq!(all_members(&result), all_members(&groups));
    }

    #[test]
    fn generation_is_complete(
        seed in any::<u64>(),
        element_count in 1usize..30,
        group_count in 1usize..6,
    ) {
        let attributes = vec![
            enum_attribute("gender", "Gender", &["F", "M"]),
            attractive_attribute("team", "Team"),
        ];
        let elements = roster(element_count);
        let constraints = soft_constraints();
        let options = GenerateOptions::builder().seed(Some(seed)).build();

        let groups = generate(&elements, group_count, &constraints, &attributes, &options).unwrap();

        let mut expected: Vec<String> = elements.iter().map(|e| e.id.clone()).collect();
        expected.sort();
        prop_assert_eq!(all_members(&groups), expected);
        prop_assert_eq!(groups.len(), group_count);
    }

    #[test]
    fn round_robin_fallback_is_complete(
        seed in any::<u64>(),
        element_count in 0usize..30,
        group_count in 1usize..6,
    ) {
        let elements = roster(element_count);
        let options = GenerateOptions::builder().seed(Some(seed)).build();

        let groups = generate(&elements, group_count, &[], &[], &options).unwrap();

        let mut expected: Vec<String> = elements.iter().map(|e| e.id.clone()).collect();
        expected.sort();
        prop_assert_eq!(all_members(&groups), expected);

        // Round-robin keeps sizes within one of each other.
        let sizes: Vec<usize> = groups.iter().map(|g| g.members.len()).collect();
        let max = sizes.iter().copied().max().unwrap_or(0);
        let min = sizes.iter().copied().min().unwrap_or(0);
        prop_assert!(max - min <= 1);
    }
}
