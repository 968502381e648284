mod common;
mod roster;
mod routing;
