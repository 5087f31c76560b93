pub use self::{
    path::get_path,
    types::{DataBase, PoolOption, PoolType},
};

mod exchange_rate;
mod path;
mod sync_data;
mod types;
