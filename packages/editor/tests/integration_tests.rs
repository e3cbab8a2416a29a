//! Integration tests for editor crate

mod common;

use common::FakePageApi;
use pagecraft_editor::{
    BlockData, BlockPatch, BlockType, EditSession, EditorConfig, HeroPayload, MetaPatch,
    PageApi, PageCoordinator, PageQuery, PageStatus, SeoMeta,
};
use std::sync::Arc;

#[tokio::test]
async fn test_page_lifecycle() {
    let api = Arc::new(FakePageApi::new());
    let coordinator = PageCoordinator::new(api.clone());
    let mut session = EditSession::new(&EditorConfig::default());

    // create mode
    coordinator.create_new(&mut session);
    assert!(!session.page().unwrap().is_persisted());

    session.update_meta(MetaPatch {
        title: Some("Summer Bootcamp".into()),
        seo: Some(SeoMeta {
            meta_title: Some("Summer Bootcamp | Iron Gym".into()),
            ..Default::default()
        }),
        ..Default::default()
    });
    let hero = session
        .add_block(
            BlockData::Hero(HeroPayload {
                heading: Some("Six weeks. One goal.".into()),
                cta_label: Some("Sign up".into()),
                ..Default::default()
            }),
            None,
            None,
        )
        .unwrap();
    session.add_block(BlockData::empty(BlockType::Pricing), None, None);
    session.add_block(BlockData::empty(BlockType::Faq), None, None);
    session.move_block(2, 1);

    coordinator.save(&mut session).await.unwrap();
    let page = session.page().unwrap();
    assert_eq!(page.slug, "summer-bootcamp");
    assert_eq!(page.status, PageStatus::Draft);
    let types: Vec<_> = page.blocks.iter().map(|b| b.block_type()).collect();
    assert_eq!(types, vec![BlockType::Hero, BlockType::Faq, BlockType::Pricing]);

    // local ids were replaced, so edits go through the server ids
    assert!(session.block(&hero).is_none());
    let hero_id = session.blocks()[0].id.clone();
    session.update_block(
        &hero_id,
        BlockPatch::data(BlockData::Hero(HeroPayload {
            heading: Some("Six weeks. Your goal.".into()),
            ..Default::default()
        })),
    );
    assert!(session.is_dirty());

    coordinator.publish(&mut session).await.unwrap();
    assert!(!session.is_dirty());

    // a fresh session sees the published content
    let mut reader = EditSession::default();
    coordinator.load(&mut reader, "summer-bootcamp").await.unwrap();
    let loaded = reader.page().unwrap();
    assert_eq!(loaded.status, PageStatus::Published);
    assert_eq!(loaded.seo.meta_title.as_deref(), Some("Summer Bootcamp | Iron Gym"));
    match &loaded.blocks[0].data {
        BlockData::Hero(hero) => assert_eq!(hero.heading.as_deref(), Some("Six weeks. Your goal.")),
        other => panic!("expected hero, got {:?}", other.block_type()),
    }
}

#[tokio::test]
async fn test_listing_and_deleting_pages() {
    let api = Arc::new(FakePageApi::new());
    let coordinator = PageCoordinator::new(api.clone());

    for title in ["Yoga", "Pilates", "Yoga for Runners"] {
        let mut session = EditSession::default();
        coordinator.create_new(&mut session);
        session.update_meta(MetaPatch::title(title));
        coordinator.save(&mut session).await.unwrap();
    }

    let query = PageQuery {
        search: Some("yoga".into()),
        ..Default::default()
    };
    let list = api.list_pages(&query).await.unwrap();
    assert_eq!(list.pagination.total, 2);
    assert!(list.pages.iter().all(|p| p.blocks.is_none()));

    api.delete_page("pilates").await.unwrap();
    let mut session = EditSession::default();
    assert!(coordinator.load(&mut session, "pilates").await.is_err());
}

#[tokio::test]
async fn test_metadata_only_fetch() {
    let api = FakePageApi::new().with_page(common::record(
        "5",
        "contact",
        "Contact",
        vec![common::server_block("c1", 0, BlockData::empty(BlockType::Contact))],
    ));

    let record = api.fetch_page("contact", false).await.unwrap();
    assert!(record.blocks.is_none());
    assert_eq!(record.title, "Contact");
}
