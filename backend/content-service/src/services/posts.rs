/// Post repository - the single source of truth for feed data
///
/// Every mutation loads the whole `posts` collection, applies one change,
/// saves the whole collection back and then publishes `postsUpdated` once.
/// Failures and no-ops neither write nor publish.
use crate::error::{ContentError, Result};
use crate::models::Post;
use crate::validation;
use change_bus::{ChangeBus, ChangeEvent};
use identity_service::User;
use kv_store::{SharedStore, StoreExt, StoreKey};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct PostRepository {
    store: SharedStore,
    bus: ChangeBus,
}

impl PostRepository {
    pub fn new(store: SharedStore, bus: ChangeBus) -> Self {
        Self { store, bus }
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// The whole collection in storage order (newest first)
    pub fn all_posts(&self) -> Result<Vec<Post>> {
        let posts: Vec<Post> = self.store.load(StoreKey::Posts)?.unwrap_or_default();
        debug!(count = posts.len(), "Loaded post collection");
        Ok(posts)
    }

    pub fn get_post(&self, post_id: &str) -> Result<Option<Post>> {
        Ok(self.all_posts()?.into_iter().find(|p| p.id == post_id))
    }

    /// Persist the collection, then announce the change
    pub(crate) fn commit(&self, posts: &[Post]) -> Result<()> {
        self.store.save(StoreKey::Posts, posts)?;
        let delivered = self.bus.publish(ChangeEvent::PostsUpdated);
        debug!(count = posts.len(), delivered, "Post collection committed");
        Ok(())
    }

    pub fn create_post(
        &self,
        session: Option<&User>,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let user = require_session(session)?;
        let text = validation::post_text(text)?;
        let image_url = validation::image_url(image_url)?;

        let mut posts = self.all_posts()?;
        let post = Post::new(user, text, image_url);
        posts.insert(0, post.clone());
        self.commit(&posts)?;

        info!(post_id = %post.id, author_id = %user.id, "Post created");
        Ok(post)
    }

    pub fn delete_post(&self, session: Option<&User>, post_id: &str) -> Result<()> {
        let user = require_session(session)?;

        let mut posts = self.all_posts()?;
        let idx = find_index(&posts, post_id)?;
        if posts[idx].author_id != user.id {
            warn!(post_id = %post_id, user_id = %user.id, "Delete rejected: not the author");
            return Err(ContentError::Forbidden(
                "You can only delete your own posts".into(),
            ));
        }

        posts.remove(idx);
        self.commit(&posts)?;

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    /// Replace text and image; id, author, likes, comments and timestamp stay
    pub fn edit_post(
        &self,
        session: Option<&User>,
        post_id: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let user = require_session(session)?;
        let text = validation::post_text(text)?;
        let image_url = validation::image_url(image_url)?;

        let mut posts = self.all_posts()?;
        let idx = find_index(&posts, post_id)?;
        let post = &mut posts[idx];
        if post.author_id != user.id {
            warn!(post_id = %post_id, user_id = %user.id, "Edit rejected: not the author");
            return Err(ContentError::Forbidden(
                "You can only edit your own posts".into(),
            ));
        }

        post.text = text;
        post.image_url = image_url;
        let edited = post.clone();
        self.commit(&posts)?;

        info!(post_id = %post_id, "Post edited");
        Ok(edited)
    }

    /// Like or unlike for the session user; any signed-in user may toggle any post
    pub fn toggle_like(&self, session: Option<&User>, post_id: &str) -> Result<Post> {
        let user = require_session(session)?;

        let mut posts = self.all_posts()?;
        let idx = find_index(&posts, post_id)?;
        let liked = posts[idx].toggle_like(&user.id);
        let post = posts[idx].clone();
        self.commit(&posts)?;

        info!(post_id = %post_id, user_id = %user.id, liked, likes = post.likes, "Like toggled");
        Ok(post)
    }

    /// Case-insensitive substring match on text or author name.
    /// A blank query returns the whole collection in storage order.
    pub fn search_posts(&self, query: &str) -> Result<Vec<Post>> {
        let posts = self.all_posts()?;
        Ok(filter_by_query(posts, query))
    }
}

pub(crate) fn require_session(session: Option<&User>) -> Result<&User> {
    session.ok_or(ContentError::Unauthenticated)
}

pub(crate) fn find_index(posts: &[Post], post_id: &str) -> Result<usize> {
    posts
        .iter()
        .position(|p| p.id == post_id)
        .ok_or_else(|| ContentError::NotFound(format!("Post {post_id} not found")))
}

/// Whether `post` matches an already lower-cased search query
pub fn matches_query(post: &Post, lower_query: &str) -> bool {
    post.text.to_lowercase().contains(lower_query)
        || post.author.to_lowercase().contains(lower_query)
}

/// Apply the search predicate to `posts`, keeping order
pub fn filter_by_query(posts: Vec<Post>, query: &str) -> Vec<Post> {
    if query.trim().is_empty() {
        return posts;
    }
    let lower = query.to_lowercase();
    posts
        .into_iter()
        .filter(|p| matches_query(p, &lower))
        .collect()
}
