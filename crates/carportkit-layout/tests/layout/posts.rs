use carportkit_layout::model::{PostId, StoragePosition, StorageRoomConfig};
use carportkit_layout::posts::{self, derive_posts, Post};
use carportkit_layout::{ConfigStore, Configuration};

fn storage(enabled: bool, position: StoragePosition) -> StorageRoomConfig {
    StorageRoomConfig {
        enabled,
        position,
        depth: 1.5,
    }
}

fn find<'a>(posts: &'a [Post], id: &str) -> &'a Post {
    posts
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| panic!("missing post {}", id))
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_post_count_by_depth_band() {
    let off = storage(false, StoragePosition::Back);
    assert_eq!(derive_posts(4.0, 4.0, &off).len(), 4);
    assert_eq!(derive_posts(4.0, 4.99, &off).len(), 4);
    assert_eq!(derive_posts(4.0, 5.0, &off).len(), 6);
    assert_eq!(derive_posts(4.0, 5.5, &off).len(), 6);
    assert_eq!(derive_posts(4.0, 6.0, &off).len(), 9);
    assert_eq!(derive_posts(4.0, 8.0, &off).len(), 9);

    let on = storage(true, StoragePosition::Back);
    assert_eq!(derive_posts(4.0, 6.0, &on).len(), 10);
    assert_eq!(derive_posts(4.0, 4.5, &on).len(), 6);
}

#[test]
fn test_corner_posts_are_inset() {
    let posts = derive_posts(5.0, 7.0, &StorageRoomConfig::default());
    let fl = find(&posts, posts::FRONT_LEFT);
    assert!(near(fl.x, -2.45) && near(fl.z, 3.45));
    let br = find(&posts, posts::BACK_RIGHT);
    assert!(near(br.x, 2.45) && near(br.z, -3.45));
}

#[test]
fn test_mid_posts_at_five_meters() {
    let posts = derive_posts(4.0, 5.0, &StorageRoomConfig::default());
    let lm = find(&posts, posts::LEFT_MID_1);
    let rm = find(&posts, posts::RIGHT_MID_1);
    assert!(near(lm.x, 0.0) && near(lm.z, 2.45));
    assert!(near(rm.x, 0.0) && near(rm.z, -2.45));
    assert!(posts.iter().all(|p| p.id != posts::BACK_MID));
}

#[test]
fn test_storage_replaces_back_mid_post() {
    let posts = derive_posts(4.0, 6.0, &storage(true, StoragePosition::Back));
    assert!(posts.iter().all(|p| p.id != posts::BACK_MID));
    let inner = find(&posts, posts::STORE_FRONT_LEFT);
    assert!(near(inner.x, -0.45) && near(inner.z, 2.95));
}

#[test]
fn test_storage_posts_per_position() {
    let left = derive_posts(4.0, 6.0, &storage(true, StoragePosition::Left));
    let a = find(&left, posts::STORE_FRONT_LEFT);
    let b = find(&left, posts::STORE_FRONT_RIGHT);
    assert!(near(a.z, 1.45) && near(b.z, 1.45));

    let right = derive_posts(4.0, 6.0, &storage(true, StoragePosition::Right));
    let a = find(&right, posts::STORE_BACK_LEFT);
    let b = find(&right, posts::STORE_BACK_RIGHT);
    assert!(near(a.z, -1.45) && near(b.z, -1.45));
}

#[test]
fn test_lookup_prefers_custom_posts() {
    let mut store = ConfigStore::new();
    let id = store.add_custom_post(1.0, 3.0);
    let post = store.get_post_by_id(&id).unwrap();
    assert_eq!((post.x, post.z), (1.0, 3.0));
    assert!(!post.is_structural());

    let corner = store.get_post_by_id(&PostId::new("static-bl")).unwrap();
    assert!(corner.is_structural());
    assert!(store.get_post_by_id(&PostId::new("post-99")).is_none());
}

#[test]
fn test_structural_posts_follow_dimensions() {
    let mut store = ConfigStore::new();
    store.set_depth(4.5);
    assert_eq!(store.structural_posts().len(), 4);
    store.set_depth(7.0);
    assert_eq!(store.structural_posts().len(), 9);
    assert_eq!(
        store.structural_posts(),
        posts::structural_posts(&Configuration {
            depth: 7.0,
            ..Configuration::default()
        })
    );
}
