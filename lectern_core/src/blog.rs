use serde::{Deserialize, Serialize};

/// What a blog page needs: the post body, its header, and the ids of the
/// posts on either side of it. Every field is absent when there is no post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlogResponse<C, M> {
    pub content: Option<C>,
    pub metadata: Option<M>,
    pub prev_post_id: Option<i32>,
    pub next_post_id: Option<i32>,
}

impl<C, M> BlogResponse<C, M> {
    pub fn empty() -> Self {
        BlogResponse {
            content: None,
            metadata: None,
            prev_post_id: None,
            next_post_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.metadata.is_none()
    }
}

impl<C, M> Default for BlogResponse<C, M> {
    fn default() -> Self {
        BlogResponse::empty()
    }
}
