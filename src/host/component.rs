//! Component types, instances and elements.

use std::any::Any;
use std::sync::Arc;

use crate::connect::ConnectError;
use crate::props::Props;

use super::{NodeId, RenderQueue, Scope};

/// Shared handle to a component type. Identity matters: two elements
/// reconcile onto the same instance only when their types are the same
/// allocation.
pub type ComponentTypeRef = Arc<dyn ComponentType>;

/// True when both handles refer to the same component type.
pub fn same_type(a: &ComponentTypeRef, b: &ComponentTypeRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Everything an instance learns about its position when it is created.
#[derive(Clone)]
pub struct MountContext {
    pub node: NodeId,
    pub scope: Scope,
    pub queue: RenderQueue,
}

/// Factory for instances.
pub trait ComponentType: Send + Sync + 'static {
    fn name(&self) -> String;

    /// Create an instance. Errors abort the mount.
    fn instantiate(
        &self,
        props: &Props,
        ctx: &MountContext,
    ) -> Result<Box<dyn Instance>, ConnectError>;
}

/// A live component inside a [`Host`](super::Host).
pub trait Instance: Send + 'static {
    /// Parent handed down `next`. Returning `false` keeps the last render.
    fn should_update(&mut self, _prev: &Props, _next: &Props) -> Result<bool, ConnectError> {
        Ok(true)
    }

    fn render(&mut self, props: &Props, children: &[Element]) -> Result<Vec<Element>, ConnectError>;

    /// Scope handed to this instance's children.
    fn child_scope(&self, scope: &Scope) -> Scope {
        scope.clone()
    }

    /// Called when the instance is popped from the render queue.
    /// `Ok(true)` requests a render with the current props.
    fn take_update(&mut self) -> Result<bool, ConnectError> {
        Ok(false)
    }

    fn detach(&mut self) {}

    fn as_any(&self) -> &dyn Any;
}

/// Description of a child to mount or update.
#[derive(Clone)]
pub struct Element {
    pub ty: ComponentTypeRef,
    pub props: Props,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(ty: ComponentTypeRef, props: Props) -> Self {
        Self {
            ty,
            props,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("ty", &self.ty.name())
            .field("props", &self.props)
            .field("children", &self.children)
            .finish()
    }
}

type RenderFn = dyn Fn(&Props, &[Element]) -> Vec<Element> + Send + Sync;

struct FnComponent {
    name: String,
    render: Arc<RenderFn>,
}

struct FnInstance {
    render: Arc<RenderFn>,
}

impl ComponentType for FnComponent {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn instantiate(
        &self,
        _props: &Props,
        _ctx: &MountContext,
    ) -> Result<Box<dyn Instance>, ConnectError> {
        Ok(Box::new(FnInstance {
            render: Arc::clone(&self.render),
        }))
    }
}

impl Instance for FnInstance {
    fn render(&mut self, props: &Props, children: &[Element]) -> Result<Vec<Element>, ConnectError> {
        Ok((self.render)(props, children))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Plain component: re-renders whenever its parent does.
pub fn component_fn(
    name: impl Into<String>,
    render: impl Fn(&Props, &[Element]) -> Vec<Element> + Send + Sync + 'static,
) -> ComponentTypeRef {
    Arc::new(FnComponent {
        name: name.into(),
        render: Arc::new(render),
    })
}
