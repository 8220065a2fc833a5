use attest_lens_engine::{
    parse_date, BadgeRender, EmptyReason, EngineConfig, OnchainFilter, RecipeSelection,
    ResolutionMode, SlotKind, Viewer,
};
use attest_lens_records::{
    Asset, AttestationRecord, AttestationType, Catalog, Recipe, RecipeItem,
};
use pretty_assertions::assert_eq;

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            Asset::named("Acme Bond").ticker("ACME").issuer("Acme Corp"),
            Asset::named("Gold Note").ticker("GOLD"),
        ],
        vec![
            AttestationRecord::new("Acme Bond", "X", "2024-01-01")
                .type_id("typeA")
                .schema("Reserve Audit")
                .onchain(true)
                .expires("2024-01-11"),
            AttestationRecord::new("Gold Note", "X", "2024-01-01").type_id("typeB"),
            AttestationRecord::new("Acme Bond", "Y", "2024-01-01").schema("Legal Opinion"),
            AttestationRecord::new("Acme Bond", "Z", "2024-01-01")
                .schema("Custody")
                .onchain(true),
        ],
        vec![
            AttestationType::new("typeA", "Reserve Audit"),
            AttestationType::new("typeB", "KYB").description("Know your business"),
        ],
        vec![Recipe::new(
            "Basic",
            vec![RecipeItem::required("typeA"), RecipeItem::optional("typeB")],
        )],
    )
}

fn viewer() -> Viewer {
    Viewer::with_catalog(catalog(), EngineConfig::default())
}

#[test]
fn recipe_slot_filled_by_selected_attestor() {
    let mut viewer = viewer();
    viewer.select_recipe(RecipeSelection::parse("Basic"));
    let mut session = viewer.open("Acme Bond").unwrap();
    session.add_attestor("X");

    let resolution = session.resolve();
    assert_eq!(resolution.mode, ResolutionMode::Recipe("Basic".into()));
    assert_eq!(resolution.slots.len(), 2);

    let filled = &resolution.slots[0];
    assert_eq!(filled.index, 0);
    assert_eq!(filled.attestation().unwrap().attestor, "X");
    assert_eq!(filled.recipe_item(), Some(&RecipeItem::required("typeA")));

    let missing = &resolution.slots[1];
    assert_eq!(missing.index, 1);
    assert_eq!(missing.label, "KYB");
    assert_eq!(
        missing.kind,
        SlotKind::Empty {
            recipe_item: RecipeItem::optional("typeB"),
            reason: EmptyReason::Missing,
        }
    );
}

#[test]
fn offchain_filter_empties_onchain_recipe_slot() {
    let mut viewer = viewer();
    viewer.select_recipe(RecipeSelection::parse("Basic"));
    let mut session = viewer.open("Acme Bond").unwrap();
    session.add_attestor("X");
    session.set_onchain_mode("offchain").unwrap();

    let resolution = session.resolve();
    assert_eq!(resolution.slots.len(), 2);
    assert!(!resolution.slots[0].is_filled());
    assert!(matches!(
        resolution.slots[0].kind,
        SlotKind::Empty {
            reason: EmptyReason::FilteredOnchain,
            ..
        }
    ));
}

#[test]
fn freeform_without_attestors_shows_everything() {
    let session = viewer().open("Acme Bond").unwrap();
    let resolution = session.resolve();

    assert_eq!(resolution.mode, ResolutionMode::Freeform);
    let labels: Vec<_> = resolution.slots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Reserve Audit", "Legal Opinion", "Custody"]);
}

#[test]
fn freeform_never_leaks_foreign_or_filtered_records() {
    let mut session = viewer().open("Acme Bond").unwrap();
    session.set_onchain_filter(OnchainFilter::Onchain);
    session.add_attestor("X");
    session.add_attestor("Z");

    for slot in session.resolve().slots {
        let record = slot.attestation().unwrap();
        assert_eq!(record.asset_name, "Acme Bond");
        assert!(record.onchain);
        assert!(session.lens().has_attestor(&record.attestor));
    }
}

#[test]
fn recipe_slots_bounded_and_indexed_by_position() {
    let items: Vec<_> = (0..40)
        .map(|i| RecipeItem::optional(format!("t{i}")))
        .collect();
    let catalog = Catalog::new(
        vec![Asset::named("Acme Bond")],
        vec![],
        vec![],
        vec![Recipe::new("Huge", items)],
    );
    let mut viewer = Viewer::with_catalog(catalog, EngineConfig::default());
    viewer.select_recipe(RecipeSelection::parse("Huge"));

    let resolution = viewer.open("Acme Bond").unwrap().resolve();
    assert_eq!(resolution.slots.len(), 30);
    assert_eq!(resolution.truncated, 10);
    for (position, slot) in resolution.slots.iter().enumerate() {
        assert_eq!(slot.index, position);
        assert_eq!(slot.label, format!("t{position}"));
    }
}

#[test]
fn render_places_and_colors_badges() {
    let session = viewer().open("Acme Bond").unwrap();
    let now = parse_date("now", "2024-01-09").unwrap();
    let view = session.render(now);

    assert_eq!(view.asset, "Acme Bond");
    assert_eq!(view.badges.len(), 3);
    assert_eq!(view.flagged().count(), 0);

    let BadgeRender::Ring(ring) = &view.badges[0].render else {
        panic!("expected decay ring");
    };
    assert_eq!(ring.color, "#f56565");
    assert!(!ring.is_expired);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["badges"][0]["position"]["left"], -12.0);
    assert_eq!(json["badges"][0]["render"]["state"], "ring");
    assert_eq!(json["mode"]["mode"], "freeform");
}

#[test]
fn viewer_carries_recipe_but_not_filters() {
    let mut viewer = viewer();
    let mut session = viewer.open("Acme Bond").unwrap();
    session.add_attestor("Y");
    session.set_onchain_filter(OnchainFilter::Offchain);
    session.set_recipe(RecipeSelection::parse("Basic"));
    viewer.close(session);

    let session = viewer.open_row("Gold Note | GOLD | 1.2M").unwrap();
    assert_eq!(session.asset().name, "Gold Note");
    assert_eq!(session.lens().recipe().name(), Some("Basic"));
    assert!(!session.lens().restricts_attestors());
    assert_eq!(session.lens().onchain(), OnchainFilter::All);

    let detail = session.detail(1).unwrap();
    assert_eq!(detail.title(), "typeB");
}
