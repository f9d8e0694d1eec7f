pub mod loc;
pub mod errors;
pub mod op;
pub mod ty;
pub mod ignore_result;
pub mod indent_printer;

pub use crate::{loc::*, errors::*, op::*, ty::*, ignore_result::*, indent_printer::*};
use hashbrown::hash_map::DefaultHashBuilder;

const INDENT: u32 = 4;
const INDENT_STR: &str = "    ";

// hashbrown's default hasher is faster than RandomState (the default of IndexMap/Set & std HashMap/Set)
// routing the index maps through it keeps every map in the workspace on one hasher
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, DefaultHashBuilder>;
pub type IndexSet<K> = indexmap::IndexSet<K, DefaultHashBuilder>;
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;
pub type HashSet<K> = hashbrown::HashSet<K>;
