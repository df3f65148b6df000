//! Model Hamiltonians that produce ready-to-use CCD inputs

pub mod pairing;

pub use pairing::PairingModel;
