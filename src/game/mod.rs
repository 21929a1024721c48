pub mod events;
pub mod game_state;
pub mod move_record;
pub mod orchestrator;
