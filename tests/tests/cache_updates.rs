use ovsdb_orm::{cache::TableUpdates, Db};
use tests::{models, models::*, DbTest};

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn updates(json: serde_json::Value) -> TableUpdates {
    serde_json::from_value(json).unwrap()
}

#[test]
fn reads_follow_update_notifications() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalRouter));

    let changed = db.cache().apply(updates(json!({
        "Logical_Router": {
            "r1": {"new": {
                "name": "lr0",
                "enabled": ["set", [true]],
                "load_balancer": ["set", []],
                "copp": ["set", []],
            }},
            "r2": {"new": {
                "name": "lr1",
                "enabled": ["set", []],
                "load_balancer": ["set", [["named-uuid", "lb1"]]],
                "copp": ["named-uuid", "copp1"],
            }},
        }
    })));
    assert_eq!(changed, 2);

    let router: LogicalRouter = db.get_by_id("r1").unwrap();
    assert_eq!(router.enabled, Some(true));
    assert_eq!(router.copp, None);

    let router: LogicalRouter = db.get_by_id("r2").unwrap();
    assert_eq!(router.enabled, None);
    assert_eq!(router.load_balancer, ["lb1"]);
    assert_eq!(router.copp.as_deref(), Some("copp1"));

    db.cache().apply(updates(json!({
        "Logical_Router": {
            "r1": {
                "old": {"name": "lr0"},
                "new": {
                    "name": "lr0-renamed",
                    "enabled": ["set", [false]],
                    "load_balancer": ["set", []],
                    "copp": ["set", []],
                },
            },
            "r2": {"old": {"name": "lr1"}},
        }
    })));

    let routers = db.list::<LogicalRouter>().unwrap();
    assert_eq!(routers.len(), 1);
    assert_eq!(routers[0].name, "lr0-renamed");
    assert_eq!(routers[0].enabled, Some(false));

    assert!(db.get_by_id::<LogicalRouter>("r2").unwrap_err().is_record_not_found());
}

#[test]
fn removing_unknown_rows_changes_nothing() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalRouter));

    let changed = db.cache().apply(updates(json!({
        "Logical_Router": {"missing": {"old": {"name": "lr0"}}}
    })));
    assert_eq!(changed, 0);
    assert!(db.list::<LogicalRouter>().unwrap().is_empty());
}

#[test]
fn clear_empties_every_table() {
    let test = DbTest::new();
    let db = test.setup_db(models!(DatapathBinding, LogicalRouter));

    db.cache().apply(updates(json!({
        "Datapath_Binding": {"d1": {"new": {"tunnel_key": 1, "external_ids": ["map", []]}}},
        "Logical_Router": {"r1": {"new": {"name": "lr0"}}},
    })));
    assert_eq!(db.list::<DatapathBinding>().unwrap().len(), 1);

    db.cache().clear();

    assert!(db.list::<DatapathBinding>().unwrap().is_empty());
    assert!(db.list::<LogicalRouter>().unwrap().is_empty());
}

#[test]
fn db_is_shareable() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<Db>();
}

#[tokio::test]
async fn concurrent_readers_see_whole_batches() {
    let test = DbTest::new();
    let db = test.setup_db(models!(DatapathBinding));

    let batch = |key: i64| {
        let mut updates = TableUpdates::new();
        for id in ["d1", "d2", "d3"] {
            updates = updates.insert(
                "Datapath_Binding",
                id,
                serde_json::from_value(json!({"tunnel_key": key, "external_ids": ["map", []]}))
                    .unwrap(),
            );
        }
        updates
    };
    db.cache().apply(batch(0));

    let cache = Arc::clone(db.cache());
    let writer = tokio::spawn(async move {
        for key in 1..=50 {
            cache.apply(batch(key));
            tokio::task::yield_now().await;
        }
    });

    let mut readers = vec![];
    for _ in 0..4 {
        let db = db.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..50 {
                let bindings = db.list::<DatapathBinding>().unwrap();
                assert_eq!(bindings.len(), 3);

                let key = bindings[0].tunnel_key;
                assert!(bindings.iter().all(|b| b.tunnel_key == key));
                tokio::task::yield_now().await;
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    let bindings = db.list::<DatapathBinding>().unwrap();
    assert!(bindings.iter().all(|b| b.tunnel_key == 50));
}
