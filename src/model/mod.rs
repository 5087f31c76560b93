mod exchange_rate;
mod sync_data;
mod table;

pub use self::{
    exchange_rate::Exchange_Rate,
    sync_data::{Record_Filter, Sync_Data},
    table::Table,
};
