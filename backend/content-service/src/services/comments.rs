/// Comment operations on the post repository
///
/// Comments are embedded in their post; adding or deleting one rewrites the
/// post collection like any other mutation.
use super::posts::{find_index, require_session, PostRepository};
use crate::error::{ContentError, Result};
use crate::models::Comment;
use identity_service::User;
use tracing::{debug, info, warn};

impl PostRepository {
    /// Append a comment by the session user.
    ///
    /// Text that trims to nothing is a silent no-op returning `Ok(None)`.
    pub fn add_comment(
        &self,
        session: Option<&User>,
        post_id: &str,
        text: &str,
    ) -> Result<Option<Comment>> {
        let user = require_session(session)?;

        let text = text.trim();
        if text.is_empty() {
            debug!(post_id = %post_id, "Ignoring empty comment");
            return Ok(None);
        }

        let mut posts = self.all_posts()?;
        let idx = find_index(&posts, post_id)?;
        let comment = Comment::new(user, text.to_string());
        posts[idx].comments.push(comment.clone());
        self.commit(&posts)?;

        info!(post_id = %post_id, comment_id = %comment.id, "Comment added");
        Ok(Some(comment))
    }

    /// Remove a comment written by the session user.
    ///
    /// A comment id that is not on the post is a silent no-op.
    pub fn delete_comment(
        &self,
        session: Option<&User>,
        post_id: &str,
        comment_id: &str,
    ) -> Result<()> {
        let user = require_session(session)?;

        let mut posts = self.all_posts()?;
        let idx = find_index(&posts, post_id)?;
        let comments = &mut posts[idx].comments;
        let Some(comment_idx) = comments.iter().position(|c| c.id == comment_id) else {
            debug!(post_id = %post_id, comment_id = %comment_id, "Comment already gone");
            return Ok(());
        };

        if comments[comment_idx].author_id != user.id {
            warn!(comment_id = %comment_id, user_id = %user.id, "Delete rejected: not the author");
            return Err(ContentError::Forbidden(
                "You can only delete your own comments".into(),
            ));
        }

        comments.remove(comment_idx);
        self.commit(&posts)?;

        info!(post_id = %post_id, comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}
