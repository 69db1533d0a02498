//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod app_user;
pub mod friend;
pub mod friend_assignment;
pub mod item;
pub mod item_assignment;
pub mod receipt;
pub mod receipt_friend;

// Re-export specific types to avoid conflicts
pub use app_user::{Column as AppUserColumn, Entity as AppUser, Model as AppUserModel};
pub use friend::{Column as FriendColumn, Entity as Friend, Model as FriendModel};
pub use friend_assignment::{
    Column as FriendAssignmentColumn, Entity as FriendAssignment, Model as FriendAssignmentModel,
};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use item_assignment::{
    Column as ItemAssignmentColumn, Entity as ItemAssignment, Model as ItemAssignmentModel,
};
pub use receipt::{Column as ReceiptColumn, Entity as Receipt, Model as ReceiptModel};
pub use receipt_friend::{
    Column as ReceiptFriendColumn, Entity as ReceiptFriend, Model as ReceiptFriendModel,
};
