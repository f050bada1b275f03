//! Arena-backed component tree.

use std::fmt;

use crate::connect::ConnectError;
use crate::props::Props;

use super::{same_type, ComponentTypeRef, Element, Instance, MountContext, RenderQueue, Scope};

/// Index of a node in the host arena. Ids are never reused, so a stale id
/// left in the render queue simply misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Node {
    ty: ComponentTypeRef,
    instance: Box<dyn Instance>,
    props: Props,
    children: Vec<Element>,
    rendered: Vec<NodeId>,
    /// Scope handed to rendered children.
    scope: Scope,
    render_count: usize,
}

/// Mounts elements, reconciles children and drains deferred renders.
///
/// Store listeners never render synchronously; they schedule their node on
/// the host's [`RenderQueue`]. [`Host::flush`] drains it in FIFO order, so
/// an ancestor re-renders (handing fresh props to its descendants) before
/// a descendant's own queued update is looked at.
pub struct Host {
    nodes: Vec<Option<Node>>,
    root: Option<NodeId>,
    queue: RenderQueue,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            queue: RenderQueue::new(),
        }
    }

    /// Mount `element` as the root, replacing any previous tree.
    ///
    /// Construction errors tear down whatever part of the tree was already
    /// created and are returned unchanged.
    pub fn mount(&mut self, element: Element) -> Result<NodeId, ConnectError> {
        self.unmount();
        let root = self.mount_element(&element, &Scope::root())?;
        self.root = Some(root);
        Ok(root)
    }

    /// Hand the root new props, as a parent re-render would.
    pub fn set_root_props(&mut self, props: Props) -> Result<(), ConnectError> {
        let root = self.root.ok_or(ConnectError::NotMounted)?;
        let children = self.node(root)?.children.clone();
        self.update_node(root, props, children)
    }

    /// Detach the whole tree. Calling it again is a no-op.
    pub fn unmount(&mut self) {
        if let Some(root) = self.root.take() {
            self.detach_subtree(root);
        }
    }

    /// Run every queued store-driven render. Returns how many nodes rendered.
    pub fn flush(&mut self) -> Result<usize, ConnectError> {
        let mut rendered = 0;
        while let Some(id) = self.queue.pop() {
            let Some(node) = self.nodes.get_mut(id.0).and_then(Option::as_mut) else {
                continue;
            };
            if node.instance.take_update()? {
                self.render_node(id)?;
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Number of queued render requests.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    pub fn name_of(&self, id: NodeId) -> Option<String> {
        self.node(id).ok().map(|node| node.ty.name())
    }

    /// Props the node last received from its parent.
    pub fn props_of(&self, id: NodeId) -> Option<&Props> {
        self.node(id).ok().map(|node| &node.props)
    }

    pub fn children_of(&self, id: NodeId) -> Option<&[NodeId]> {
        self.node(id).ok().map(|node| node.rendered.as_slice())
    }

    /// The single child a wrapper rendered, e.g. the component wrapped by `connect`.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children_of(id).and_then(|children| children.first().copied())
    }

    pub fn render_count(&self, id: NodeId) -> Option<usize> {
        self.node(id).ok().map(|node| node.render_count)
    }

    /// Mounted nodes named `name`, parents before children.
    pub fn find_by_name(&self, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Ok(node) = self.node(id) else { continue };
            if node.ty.name() == name {
                found.push(id);
            }
            stack.extend(node.rendered.iter().rev().copied());
        }
        found
    }

    /// Borrow a node's instance as its concrete type.
    pub fn instance<T: 'static>(&self, id: NodeId) -> Option<&T> {
        self.node(id)
            .ok()
            .and_then(|node| node.instance.as_any().downcast_ref::<T>())
    }

    fn node(&self, id: NodeId) -> Result<&Node, ConnectError> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(ConnectError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, ConnectError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(ConnectError::UnknownNode(id))
    }

    fn mount_element(&mut self, element: &Element, scope: &Scope) -> Result<NodeId, ConnectError> {
        let id = NodeId(self.nodes.len());
        let ctx = MountContext {
            node: id,
            scope: scope.clone(),
            queue: self.queue.clone(),
        };
        let instance = element.ty.instantiate(&element.props, &ctx)?;
        let child_scope = instance.child_scope(scope);

        self.nodes.push(Some(Node {
            ty: element.ty.clone(),
            instance,
            props: element.props.clone(),
            children: element.children.clone(),
            rendered: Vec::new(),
            scope: child_scope,
            render_count: 0,
        }));

        if let Err(err) = self.render_node(id) {
            self.detach_subtree(id);
            return Err(err);
        }
        Ok(id)
    }

    fn update_node(
        &mut self,
        id: NodeId,
        props: Props,
        children: Vec<Element>,
    ) -> Result<(), ConnectError> {
        let node = self.node_mut(id)?;
        let rerender = node.instance.should_update(&node.props, &props)?;
        node.props = props;
        node.children = children;

        if rerender {
            self.render_node(id)
        } else {
            tracing::trace!(node = %id, component = %node.ty.name(), "Skipped render, props unchanged");
            Ok(())
        }
    }

    fn render_node(&mut self, id: NodeId) -> Result<(), ConnectError> {
        let node = self.node_mut(id)?;
        node.render_count += 1;
        let elements = node.instance.render(&node.props, &node.children)?;
        self.reconcile(id, elements)
    }

    /// Match rendered elements to existing children by position and type.
    fn reconcile(&mut self, id: NodeId, elements: Vec<Element>) -> Result<(), ConnectError> {
        let (previous, scope) = {
            let node = self.node(id)?;
            (node.rendered.clone(), node.scope.clone())
        };

        let mut next = Vec::with_capacity(elements.len());
        let mut outcome = Ok(());

        for (index, element) in elements.into_iter().enumerate() {
            let reusable = previous.get(index).copied().filter(|child| {
                self.node(*child)
                    .is_ok_and(|node| same_type(&node.ty, &element.ty))
            });

            let step = match reusable {
                Some(child) => {
                    next.push(child);
                    self.update_node(child, element.props, element.children)
                }
                None => {
                    if let Some(stale) = previous.get(index).copied() {
                        self.detach_subtree(stale);
                    }
                    self.mount_element(&element, &scope).map(|child| next.push(child))
                }
            };

            if let Err(err) = step {
                // Keep untouched siblings mounted; the next render retries.
                next.extend(
                    previous
                        .iter()
                        .skip(index + 1)
                        .copied()
                        .filter(|child| self.is_mounted(*child)),
                );
                outcome = Err(err);
                break;
            }
        }

        for child in previous {
            if !next.contains(&child) {
                self.detach_subtree(child);
            }
        }

        self.node_mut(id)?.rendered = next;
        outcome
    }

    /// Remove a node and its descendants, descendants first.
    fn detach_subtree(&mut self, id: NodeId) {
        let Some(mut node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        for child in node.rendered.drain(..) {
            self.detach_subtree(child);
        }
        tracing::trace!(node = %id, component = %node.ty.name(), "Detached");
        node.instance.detach();
    }
}
