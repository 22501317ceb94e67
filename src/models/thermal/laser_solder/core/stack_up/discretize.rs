//! Node allocation across layers.

/// Distributes at least `count` nodes over layers of the given thicknesses.
///
/// Each layer receives nodes in proportion to its share of the total
/// thickness, with a minimum of one. While the total is short of `count`,
/// a node is added to the layer with the coarsest spacing (first wins on ties).
///
/// The caller guarantees `thicknesses` is non-empty and strictly positive.
pub(super) fn allocate(thicknesses: &[f64], count: usize) -> Vec<usize> {
    let total: f64 = thicknesses.iter().sum();

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let mut nodes: Vec<usize> = thicknesses
        .iter()
        .map(|t| ((count as f64) * t / total).round().max(1.0) as usize)
        .collect();

    while nodes.iter().sum::<usize>() < count {
        let mut coarsest = 0;
        let mut coarsest_dx = f64::NEG_INFINITY;
        for (i, (&t, &n)) in thicknesses.iter().zip(&nodes).enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let dx = t / n as f64;
            if dx > coarsest_dx {
                coarsest = i;
                coarsest_dx = dx;
            }
        }
        nodes[coarsest] += 1;
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_with_one_node_minimum() {
        // lead 0.3 mm, solder 0.2 mm, pad 0.1 mm, board 1.6 mm
        let nodes = allocate(&[0.3e-3, 0.2e-3, 0.1e-3, 1.6e-3], 12);
        assert_eq!(nodes, vec![2, 1, 1, 9]);
    }

    #[test]
    fn tops_up_the_coarsest_layer() {
        assert_eq!(allocate(&[1.0, 1.0], 2), vec![1, 1]);

        // Halves round away from zero, so this overshoots the request.
        assert_eq!(allocate(&[1.0, 1.0], 3), vec![2, 2]);

        // 4/3 rounds down to one node each; the missing node goes to the
        // first of the equally coarse layers.
        assert_eq!(allocate(&[1.0, 1.0, 1.0], 4), vec![2, 1, 1]);
    }
}
