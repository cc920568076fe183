//! Resource schemas and the typed values they validate into.

pub mod article;
pub mod comment;
pub mod profile;
pub mod tag;
pub mod user;

pub use article::{Article, ArticleBody, ArticleList, ArticleParam, ArticlesQuery, FeedQuery, NewArticle};
pub use comment::{CommentBody, CommentParam, NewComment};
pub use profile::{Profile, ProfileParam};
pub use tag::TagEntity;
pub use user::{LoginUser, NewUser, UpdateUser, User, UserBody};
