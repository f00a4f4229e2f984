mod smiles;
pub use smiles::*;

mod sdf;
pub use sdf::*;
