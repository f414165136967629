pub mod d400_planning;
pub mod d401_actual;
pub mod d402_balance;
