use crate::ir::SelectionKey;
use crate::ir::SelectionKeyType;
use crate::ir::SelectionSet;

/// Make a named fragment's default-implementation tree reachable under the
/// default implementation's name.
///
/// Every node (selection set, field, fragment) holding a
/// [`SelectionKeyType::Fragment`] key rooted at `fragment_root` additionally
/// gets that key with its root replaced by `implementation_root`. Keys are
/// only ever added.
pub(crate) fn patch_selection_set(
    selection_set: &SelectionSet,
    fragment_root: &str,
    implementation_root: &str,
) -> SelectionSet {
    selection_set.with_derived_keys(&|key: &SelectionKey| -> Vec<SelectionKey> {
        if key.key_type() == SelectionKeyType::Fragment && key.root() == fragment_root {
            vec![key.with_root_replaced(implementation_root)]
        } else {
            vec![]
        }
    })
}
