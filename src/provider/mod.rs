/*!
 * Cryptographic backend capabilities
 *
 * This module defines the seams between key handling and the actual cipher
 * implementations: algorithm-ready key material, the factory that turns it
 * into a backend cipher key, and the service that computes key check values.
 * The crate never implements cipher primitives itself.
 */

mod provider;

pub use provider::*;
