use routeswitch::hot_reload::watch_handlers;
use routeswitch::router::RouteTable;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod common;
use common::handler_dirs;

fn wait_for(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..60 {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    done()
}

#[test]
fn test_watch_handlers_reload() {
    let dir = handler_dirs::empty();
    handler_dirs::write_manifest(dir.path(), "pages.yaml", "routes:\n  - path: /pages/{title}\n");

    let table = Arc::new(RouteTable::from_handlers(dir.path(), None).unwrap());
    assert!(table.match_path("/media/cat.png").is_none());

    let updates: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let updates_clone = Arc::clone(&updates);
    let watcher = watch_handlers(dir.path(), Arc::clone(&table), move |routes| {
        let patterns = routes.iter().map(|r| r.value.path.clone()).collect();
        updates_clone.lock().unwrap().push(patterns);
    })
    .expect("watch_handlers");

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    handler_dirs::write_manifest(dir.path(), "media.json", r#"{"routes":[{"path":"/media/{file}"}]}"#);

    assert!(wait_for(|| table.match_path("/media/cat.png").is_some()));
    let m = table.match_path("/media/cat.png").unwrap();
    assert_eq!(m.route.value.handler, "media");
    assert_eq!(m.param("file"), Some("cat.png"));
    // existing routes keep working and keep priority
    assert_eq!(table.patterns(), vec!["/media/{file}", "/pages/{title}"]);

    let ups = updates.lock().unwrap();
    assert!(ups
        .iter()
        .any(|v| v.contains(&"/media/{file}".to_string())));
    drop(ups);

    drop(watcher);
}

#[test]
fn test_removed_manifest_drops_routes() {
    let dir = handler_dirs::empty();
    handler_dirs::write_manifest(dir.path(), "a.yaml", "routes:\n  - path: /a\n");
    let b = handler_dirs::write_manifest(dir.path(), "b.yaml", "routes:\n  - path: /b\n");

    let table = Arc::new(RouteTable::from_handlers(dir.path(), None).unwrap());
    assert_eq!(table.len(), 2);

    let watcher = watch_handlers(dir.path(), Arc::clone(&table), |_| {}).expect("watch_handlers");
    std::thread::sleep(Duration::from_millis(100));

    std::fs::remove_file(&b).unwrap();

    assert!(wait_for(|| table.match_path("/b").is_none()));
    assert!(table.match_path("/a").is_some());

    drop(watcher);
}
