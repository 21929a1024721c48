pub mod board_validation;
pub mod castling;
pub mod pieces;
pub mod possible_moves;
