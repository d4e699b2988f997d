//! Comment repository implementation

use crate::database::store::Store;
use crate::models::{Comment, CommentOrder, EventId, UserId};

impl Store {
    /// Comments of an event in the requested order
    pub fn comments_of_event(&self, event_id: EventId, order: CommentOrder) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self
            .comment_ids_of_event(event_id)
            .iter()
            .filter_map(|comment_id| self.comments.get(*comment_id))
            .collect();

        match order {
            CommentOrder::Creation => {}
            CommentOrder::FromFirst => {
                comments.sort_by(|a, b| a.created().cmp(&b.created()).then(a.id().cmp(&b.id())));
            }
            CommentOrder::FromLast => {
                comments.sort_by(|a, b| b.created().cmp(&a.created()).then(b.id().cmp(&a.id())));
            }
        }
        comments
    }

    /// Comments written by a user, in creation order
    pub fn comments_of_user(&self, user_id: UserId) -> Vec<&Comment> {
        self.comment_ids_of_user(user_id)
            .iter()
            .filter_map(|comment_id| self.comments.get(*comment_id))
            .collect()
    }
}
