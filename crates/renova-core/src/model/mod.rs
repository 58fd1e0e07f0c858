/// Shallow-merge every `Some` field of a patch over the target record
macro_rules! merge_fields {
    ($target:expr, $patch:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )*
    };
}

pub mod about;
pub mod car;
pub mod entity;
pub mod image;
pub mod inbox;
pub mod news;
pub mod testimonial;
pub mod user;

pub use about::AboutData;
pub use car::{Car, CarCondition, CarDraft, CarPatch};
pub use entity::{Collection, Entity, SortOrder};
pub use image::{ImageToken, StoredImage};
pub use inbox::{InboxMessage, InboxMessageDraft, InboxMessagePatch, MessageKind};
pub use news::{NewsPost, NewsPostDraft, NewsPostPatch};
pub use testimonial::{Testimonial, TestimonialDraft, TestimonialPatch};
pub use user::{Principal, User, UserDraft, UserPatch, UserRole};
