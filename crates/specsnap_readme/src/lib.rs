//! # specsnap_readme
//!
//! Version tag and input-file extraction from AutoRest `readme.md` descriptors.
//!
//! A descriptor declares its active tag in a metadata header and, per tag, a
//! fenced yaml block listing the OpenAPI files that make up that version:
//!
//! ````text
//! ``` yaml
//! openapi-type: arm
//! tag: package-2019-05
//! ```
//!
//! ```yaml $(tag) == 'package-2019-05'
//! input-file:
//! - Microsoft.ContainerRegistry/stable/2019-05-01/containerregistry.json
//! ```
//! ````
//!
//! ## Example
//!
//! ```rust
//! use specsnap_readme::{resolve_block, resolve_tag, OverrideTable};
//!
//! let readme = "openapi-type: arm\ntag: package-2019-05\n\n```yaml $(tag) == 'package-2019-05'\ninput-file:\n- A/x.json\n```\n";
//! let tag = resolve_tag("containerregistry", readme, &OverrideTable::new()).unwrap();
//! let version = resolve_block(readme, &tag).unwrap().unwrap();
//! assert_eq!(version.input_files(), ["A/x.json"]);
//! ```

pub mod block;
pub mod error;
mod fence;
pub mod models;
pub mod overrides;
pub mod reader;
pub mod scanner;
pub mod selector;
pub mod tag;

pub use block::resolve_block;
pub use error::{ReadmeError, ReadmeResult};
pub use models::{DeclaredVersion, VersionTag, AGGREGATE_TAG, PREVIEW_SUFFIXES};
pub use overrides::OverrideTable;
pub use reader::ReadmeReader;
pub use scanner::scan_all_versions;
pub use selector::select_best;
pub use tag::{declared_tag, resolve_surface_tag, resolve_tag};
