//! Record model for SWC port declarations.
//!
//! Every source format is normalized to these structures before merge and
//! diff operations. A port is identified by its owning SWC and its name;
//! everything else on a [`PortRecord`] is payload.
//!
//! ```ignore
//! let collection = PortCollection::builder("dids.xml")
//!     .with_record(PortRecord::new("Diag", "DataServices_DID_F190")?)
//!     .build();
//!
//! for port in collection.ports_of("Diag") {
//!     println!("{}", port.name());
//! }
//! ```

mod collection;
mod identifiers;
mod port;

pub use collection::*;
pub use identifiers::*;
pub use port::*;
