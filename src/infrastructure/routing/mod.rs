pub mod routing_state;
