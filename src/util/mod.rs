pub mod assertions;

pub mod io;
