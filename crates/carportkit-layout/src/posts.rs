//! Structural post derivation.
//!
//! Structural posts are never stored. They are recomputed from width, depth
//! and the storage room settings every time they are needed, always in the
//! same order and with the same ids, so panels can reference them by id
//! across edits.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::axes;
use crate::geometry::Edge;
use crate::model::{Configuration, CustomPost, PostId, StoragePosition, StorageRoomConfig};

/// Half of the post cross-section; posts sit this far inside the footprint.
pub const POST_OFFSET: f64 = 0.05;

/// Depth from which one intermediate post is added on each long side.
pub const MID_POST_DEPTH: f64 = 5.0;
/// Depth from which two intermediate posts per long side and a back post
/// are added.
pub const THIRDS_POST_DEPTH: f64 = 6.0;

pub const FRONT_LEFT: &str = "static-fl";
pub const FRONT_RIGHT: &str = "static-fr";
pub const BACK_LEFT: &str = "static-bl";
pub const BACK_RIGHT: &str = "static-br";
pub const LEFT_MID_1: &str = "static-lm1";
pub const LEFT_MID_2: &str = "static-lm2";
pub const RIGHT_MID_1: &str = "static-rm1";
pub const RIGHT_MID_2: &str = "static-rm2";
pub const BACK_MID: &str = "static-back-mid";
pub const STORE_FRONT_LEFT: &str = "static-store-fl";
pub const STORE_FRONT_RIGHT: &str = "static-store-fr";
pub const STORE_BACK_LEFT: &str = "static-store-bl";
pub const STORE_BACK_RIGHT: &str = "static-store-br";

/// Prefix shared by every derived post id.
pub const STRUCTURAL_PREFIX: &str = "static-";

/// A resolved post position, structural or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub x: f64,
    pub z: f64,
}

impl Post {
    pub fn new(id: impl Into<String>, x: f64, z: f64) -> Self {
        Self {
            id: PostId::new(id),
            x,
            z,
        }
    }

    /// Ground-plane position.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.z)
    }

    pub fn is_structural(&self) -> bool {
        is_structural_id(self.id.as_str())
    }
}

impl From<&CustomPost> for Post {
    fn from(post: &CustomPost) -> Self {
        Self {
            id: post.id.clone(),
            x: post.x,
            z: post.z,
        }
    }
}

/// True for ids produced by [`derive_posts`].
pub fn is_structural_id(id: &str) -> bool {
    id.starts_with(STRUCTURAL_PREFIX)
}

/// Derives the structural posts for a footprint and storage room.
///
/// Emission order is fixed: the four outer corners, the intermediate posts
/// selected by depth, the back middle post, then the two storage inner
/// posts.
pub fn derive_posts(width: f64, depth: f64, storage: &StorageRoomConfig) -> Vec<Post> {
    let hw = width / 2.0;
    let hd = depth / 2.0;
    let o = POST_OFFSET;

    let mut posts = vec![
        Post::new(FRONT_LEFT, -hw + o, hd - o),
        Post::new(FRONT_RIGHT, hw - o, hd - o),
        Post::new(BACK_LEFT, -hw + o, -hd + o),
        Post::new(BACK_RIGHT, hw - o, -hd + o),
    ];

    if (MID_POST_DEPTH..THIRDS_POST_DEPTH).contains(&depth) {
        posts.push(Post::new(LEFT_MID_1, 0.0, hd - o));
        posts.push(Post::new(RIGHT_MID_1, 0.0, -hd + o));
    }

    if depth >= THIRDS_POST_DEPTH {
        let third = width / 3.0;
        let near = -hw + third + o;
        let far = hw - third - o;
        posts.push(Post::new(LEFT_MID_1, near, hd - o));
        posts.push(Post::new(LEFT_MID_2, far, hd - o));
        posts.push(Post::new(RIGHT_MID_1, near, -hd + o));
        posts.push(Post::new(RIGHT_MID_2, far, -hd + o));

        if !storage.enabled {
            posts.push(Post::new(BACK_MID, -hw + o, 0.0));
        }
    }

    if storage.enabled {
        let edge = axes::storage_edge(storage.position);
        let inward = -axes::outward_normal(edge) * storage.depth;
        for (corner, inner) in edge_corners(edge) {
            if let Some(outer) = posts[..4].iter().find(|p| p.id == corner) {
                let at = outer.position() + inward;
                posts.push(Post::new(inner, at.x, at.y));
            }
        }
    }

    posts
}

/// Structural posts of a configuration.
pub fn structural_posts(config: &Configuration) -> Vec<Post> {
    derive_posts(config.width, config.depth, &config.storage_room)
}

/// Looks a post up by id, custom posts first, then structural ones.
pub fn find_post(config: &Configuration, id: &PostId) -> Option<Post> {
    if let Some(post) = config.custom_post(id) {
        return Some(Post::from(post));
    }
    if !is_structural_id(id.as_str()) {
        return None;
    }
    structural_posts(config).into_iter().find(|p| &p.id == id)
}

/// Custom posts followed by structural posts.
pub fn all_posts(config: &Configuration) -> Vec<Post> {
    let mut posts: Vec<Post> = config.custom_posts.iter().map(Post::from).collect();
    posts.extend(structural_posts(config));
    posts
}

/// The posts a storage room's walls hang off.
///
/// `outer[i]` and `inner[i]` are joined by an end cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAnchors {
    pub outer: [&'static str; 2],
    pub inner: [&'static str; 2],
}

/// Anchors of the storage room at `position`, on the edge the axes table
/// assigns to it.
pub fn storage_anchors(position: StoragePosition) -> StorageAnchors {
    let [(outer_a, inner_a), (outer_b, inner_b)] = edge_corners(axes::storage_edge(position));
    StorageAnchors {
        outer: [outer_a, outer_b],
        inner: [inner_a, inner_b],
    }
}

/// Corner posts on `edge`, each paired with the storage post that faces it
/// across the room.
fn edge_corners(edge: Edge) -> [(&'static str, &'static str); 2] {
    match edge {
        Edge::Left => [
            (FRONT_LEFT, STORE_FRONT_LEFT),
            (BACK_LEFT, STORE_BACK_LEFT),
        ],
        Edge::Right => [
            (FRONT_RIGHT, STORE_FRONT_RIGHT),
            (BACK_RIGHT, STORE_BACK_RIGHT),
        ],
        Edge::Front => [
            (FRONT_LEFT, STORE_FRONT_LEFT),
            (FRONT_RIGHT, STORE_FRONT_RIGHT),
        ],
        Edge::Back => [
            (BACK_LEFT, STORE_BACK_LEFT),
            (BACK_RIGHT, STORE_BACK_RIGHT),
        ],
    }
}
