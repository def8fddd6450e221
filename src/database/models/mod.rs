pub mod operator;
pub mod surat;

pub use operator::Operator;
pub use surat::{Lampiran, Surat, JENIS_KELUAR, JENIS_MASUK};
