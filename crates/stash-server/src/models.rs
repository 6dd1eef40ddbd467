//! Wire models for the stash API.

pub mod asset;
pub mod todo;

pub use asset::{
    Asset, AssetFilter, AssetPage, AssetPatch, AssetStatus, FileInfo, NewAsset, PageParams,
};
pub use todo::{NewTodo, Todo, TodoPatch};
