use copilot_core::theme::brand_ramp;
use copilot_core::{select_theme, ConversationPath, Rgb, ThemeVariant};

#[test]
fn unknown_paths_fall_back_to_the_default_palette() {
    for unknown in ["", "CareerPlan", "findrole", "somethingElse", "🚀"] {
        for dark in [false, true] {
            let theme = select_theme(unknown, dark);
            assert_eq!(theme, select_theme("careerPlan", dark), "path {unknown:?}");
            assert_eq!(theme.path, ConversationPath::CareerPlan);
        }
    }
}

#[test]
fn every_known_path_has_a_distinct_palette() {
    let ramps: Vec<_> = ConversationPath::ALL
        .into_iter()
        .map(|p| select_theme(p.key(), false).brand)
        .collect();
    for (i, a) in ramps.iter().enumerate() {
        for b in ramps.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn find_role_light_then_dark_keeps_palette() {
    let light = select_theme("findRole", false);
    assert_eq!(light.variant, ThemeVariant::Light);
    assert_eq!(light.path, ConversationPath::FindRole);
    assert_eq!(light.tokens.brand_background, Rgb::from_hex(0x256D91));

    let dark = select_theme("findRole", true);
    assert_eq!(dark.variant, ThemeVariant::Dark);
    assert_eq!(dark.path, ConversationPath::FindRole);
    assert!(std::ptr::eq(light.brand, dark.brand));
    assert_eq!(dark.tokens.brand_background, Rgb::from_hex(0x235E7D));
    assert_eq!(dark.tokens.brand_foreground, Rgb::from_hex(0x249ACF));
}

#[test]
fn selection_is_repeatable() {
    for p in ConversationPath::ALL {
        for dark in [false, true] {
            let first = select_theme(p.key(), dark);
            for _ in 0..10 {
                assert_eq!(select_theme(p.key(), dark), first);
            }
        }
    }
}

#[test]
fn default_path_key_matches_ramp() {
    assert_eq!(ConversationPath::DEFAULT.key(), "careerPlan");
    assert!(std::ptr::eq(
        select_theme("careerPlan", false).brand,
        brand_ramp(ConversationPath::CareerPlan)
    ));
}
