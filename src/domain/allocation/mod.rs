pub mod station_allocator;
pub mod station_load;
