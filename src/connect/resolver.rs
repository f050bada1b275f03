//! Store resolution for connected instances.

use crate::host::Scope;
use crate::props::Props;
use crate::store::StoreRef;

use super::ConnectError;

/// Pick the store an instance binds to.
///
/// An explicit `store` prop wins over the nearest ancestor provider.
/// Resolution happens once, at construction.
pub fn resolve_store<S: 'static>(
    own_props: &Props,
    scope: &Scope,
    component: &str,
) -> Result<StoreRef<S>, ConnectError> {
    let candidate = own_props
        .store()
        .or_else(|| scope.nearest_store())
        .ok_or_else(|| ConnectError::MissingStore {
            component: component.to_string(),
        })?;

    candidate
        .downcast::<S>()
        .ok_or_else(|| ConnectError::StoreTypeMismatch {
            component: component.to_string(),
        })
}
