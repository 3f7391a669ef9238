//! Server flavor handling.
//!
//! MySQL, Percona Server and MariaDB agree on partitioning semantics but not
//! on how `SHOW CREATE TABLE` prints them. A [`Flavor`] identifies the server
//! so renderers can pick the matching text variant.

mod flavor;

pub use flavor::{Flavor, Vendor};
