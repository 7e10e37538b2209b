pub mod optimized_route;
pub mod stop_sequence;
