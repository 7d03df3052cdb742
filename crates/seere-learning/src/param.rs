//! Model parameters and the flatten/restore pair.

use crate::error::{HarnessError, Result};

/// One named parameter tensor with an optional gradient.
///
/// Shapes are carried for bookkeeping only; gradients are stored flat
/// in row-major order, which is the order [`flatten`] and [`restore`]
/// preserve.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    shape: Vec<usize>,
    grad: Option<Vec<f32>>,
}

impl Parameter {
    /// A parameter with no gradient yet (frozen, or before backprop).
    pub fn new(name: impl Into<String>, shape: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            shape,
            grad: None,
        }
    }

    /// A parameter with a gradient attached.
    pub fn with_grad(name: impl Into<String>, shape: Vec<usize>, grad: Vec<f32>) -> Result<Self> {
        let mut param = Self::new(name, shape);
        param.set_grad(grad)?;
        Ok(param)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn grad(&self) -> Option<&[f32]> {
        self.grad.as_deref()
    }

    /// Attach a gradient; its length must match the shape.
    pub fn set_grad(&mut self, grad: Vec<f32>) -> Result<()> {
        if grad.len() != self.numel() {
            return Err(HarnessError::size_mismatch(self.numel(), grad.len()));
        }
        self.grad = Some(grad);
        Ok(())
    }

    /// Drop the gradient, as an optimizer does after applying it.
    pub fn clear_grad(&mut self) {
        self.grad = None;
    }
}

/// Parameters that currently carry a gradient, in declaration order.
pub fn with_gradients(params: &[Parameter]) -> impl Iterator<Item = &Parameter> {
    params.iter().filter(|p| p.grad.is_some())
}

/// Total gradient values across all parameters.
pub fn grad_numel(params: &[Parameter]) -> usize {
    with_gradients(params).map(|p| p.numel()).sum()
}

/// Concatenate every gradient into one contiguous buffer, in
/// parameter declaration order. Parameters without gradients are
/// skipped entirely and occupy no slots.
pub fn flatten(params: &[Parameter]) -> Vec<f32> {
    let mut flat = Vec::with_capacity(grad_numel(params));
    for param in params {
        if let Some(grad) = param.grad() {
            flat.extend_from_slice(grad);
        }
    }
    flat
}

/// Overwrite each gradient from consecutive slices of `flat`,
/// inverting [`flatten`].
///
/// All-or-nothing: the total length is checked up front, and on a
/// mismatch no parameter is touched.
pub fn restore(params: &mut [Parameter], flat: &[f32]) -> Result<()> {
    let expected = grad_numel(params);
    if flat.len() != expected {
        return Err(HarnessError::size_mismatch(expected, flat.len()));
    }

    let mut offset = 0;
    for param in params.iter_mut().filter(|p| p.grad.is_some()) {
        let numel = param.numel();
        param.grad = Some(flat[offset..offset + numel].to_vec());
        offset += numel;
    }
    Ok(())
}
