mod common;
mod recommendation;
mod rental;
