//! # Forward differences
//!
//! Finite-difference gradients along the spatial axes of image (`[N, C, H, W]`) and
//! volume (`[N, C, D, H, W]`) tensors.
//!
//! Each axis is differenced by a unit-stride depthwise convolution with the kernel
//! `[-1, 1]` and "same" padding: the input is zero-padded by a single element at the
//! end of the differenced axis, so the output keeps the input shape and the last
//! element along that axis is `0 - x[n - 1]`.

use burn::tensor::{
    backend::Backend,
    module::{conv2d, conv3d},
    ops::ConvOptions,
    Tensor,
};

/// Forward difference kernel.
pub const DIFF_KERNEL: [f32; 2] = [-1.0, 1.0];

/// Spatial axis of a `[N, C, H, W]` tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis2d {
    Height,
    Width,
}

/// Spatial axis of a `[N, C, D, H, W]` tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis3d {
    Depth,
    Height,
    Width,
}

/// Forward differences along the spatial axes of a tensor.
pub trait ForwardDifference: Sized {
    /// Axis type of this tensor layout.
    type Axis: Copy + core::fmt::Debug + 'static;

    /// Every spatial axis, in the order gradients are accumulated.
    const AXES: &'static [Self::Axis];

    /// Differences the tensor along `axis`, keeping its shape.
    fn forward_difference(self, axis: Self::Axis) -> Self;
}

impl<B: Backend> ForwardDifference for Tensor<B, 4> {
    type Axis = Axis2d;

    const AXES: &'static [Axis2d] = &[Axis2d::Width, Axis2d::Height];

    fn forward_difference(self, axis: Axis2d) -> Self {
        forward_difference_2d(self, axis)
    }
}

impl<B: Backend> ForwardDifference for Tensor<B, 5> {
    type Axis = Axis3d;

    const AXES: &'static [Axis3d] = &[Axis3d::Depth, Axis3d::Height, Axis3d::Width];

    fn forward_difference(self, axis: Axis3d) -> Self {
        forward_difference_3d(self, axis)
    }
}

/// Forward difference of a `[N, C, H, W]` tensor along `axis`.
pub fn forward_difference_2d<B: Backend>(input: Tensor<B, 4>, axis: Axis2d) -> Tensor<B, 4> {
    let [_, channels, height, width] = input.dims();
    let device = input.device();

    let (kernel_shape, padding, dim, len): ([usize; 4], [usize; 2], usize, usize) = match axis {
        Axis2d::Height => ([1, 1, 2, 1], [1, 0], 2, height),
        Axis2d::Width => ([1, 1, 1, 2], [0, 1], 3, width),
    };

    // [out_channels, in_channels / groups, kernel_h, kernel_w]
    let weight = Tensor::<B, 1>::from_floats(DIFF_KERNEL, &device)
        .reshape(kernel_shape)
        .repeat(&[channels, 1, 1, 1]);

    let options = ConvOptions::new([1, 1], padding, [1, 1], channels);

    // Symmetric padding yields one extra leading element; dropping it leaves the
    // end-padded difference.
    conv2d(input, weight, None, options).narrow(dim, 1, len)
}

/// Forward difference of a `[N, C, D, H, W]` tensor along `axis`.
pub fn forward_difference_3d<B: Backend>(input: Tensor<B, 5>, axis: Axis3d) -> Tensor<B, 5> {
    let [_, channels, depth, height, width] = input.dims();
    let device = input.device();

    let (kernel_shape, padding, dim, len): ([usize; 5], [usize; 3], usize, usize) = match axis {
        Axis3d::Depth => ([1, 1, 2, 1, 1], [1, 0, 0], 2, depth),
        Axis3d::Height => ([1, 1, 1, 2, 1], [0, 1, 0], 3, height),
        Axis3d::Width => ([1, 1, 1, 1, 2], [0, 0, 1], 4, width),
    };

    let weight = Tensor::<B, 1>::from_floats(DIFF_KERNEL, &device)
        .reshape(kernel_shape)
        .repeat(&[channels, 1, 1, 1, 1]);

    let options = ConvOptions::new([1, 1, 1], padding, [1, 1, 1], channels);

    conv3d(input, weight, None, options).narrow(dim, 1, len)
}
