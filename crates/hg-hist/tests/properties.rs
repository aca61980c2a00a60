//! Property tests for axis lookup and histogram indexing.

use hg_hist::{Axis, Histogram};
use proptest::prelude::*;

fn edges_strategy() -> impl Strategy<Value = Vec<f64>> {
    (-1e3f64..1e3, proptest::collection::vec(1e-3f64..10.0, 1..40)).prop_map(|(start, steps)| {
        let mut edges = vec![start];
        for step in steps {
            let next = edges[edges.len() - 1] + step;
            edges.push(next);
        }
        edges
    })
}

proptest! {
    #[test]
    fn prop_edge_counts(edges in edges_strategy()) {
        let axis = Axis::from_edges(edges.clone()).unwrap();
        prop_assert_eq!(axis.nbins(), edges.len() - 1);
        prop_assert_eq!(axis.nedges(), edges.len());
    }

    #[test]
    fn prop_outer_bins(edges in edges_strategy(), below in 1e-6f64..1e3, above in 1e-6f64..1e3) {
        let axis = Axis::from_edges(edges.clone()).unwrap();
        let first = edges[0];
        let last = edges[edges.len() - 1];
        prop_assert_eq!(axis.find_bin_index(first - below), 0);
        prop_assert_eq!(axis.find_bin_index(last + above), axis.nbins() + 1);
        prop_assert_eq!(axis.find_bin_index(last), axis.nbins());
        prop_assert_eq!(axis.find_bin_index(first), 1);
    }

    #[test]
    fn prop_lookup_lands_in_its_bin(edges in edges_strategy(), t in 0.0f64..1.0) {
        let axis = Axis::from_edges(edges.clone()).unwrap();
        let x = edges[0] + t * (edges[edges.len() - 1] - edges[0]);
        let bin = axis.find_bin_index(x);
        prop_assert!(axis.lower(bin).unwrap() <= x);
        prop_assert!(x < axis.upper(bin).unwrap() || (bin == axis.nbins() && x == axis.max()));
    }

    #[test]
    fn prop_rebuild_from_edges(edges in edges_strategy(), probes in proptest::collection::vec(-2e3f64..2e3, 16)) {
        let axis = Axis::from_edges(edges).unwrap();
        let copy = Axis::from_edges(axis.edges().to_vec()).unwrap();
        prop_assert_eq!(&copy, &axis);
        for x in probes {
            prop_assert_eq!(copy.find_bin_index(x), axis.find_bin_index(x));
        }
    }

    #[test]
    fn prop_find_bin_index_composes(
        a in edges_strategy(),
        b in edges_strategy(),
        c in edges_strategy(),
        x in -2e3f64..2e3,
        y in -2e3f64..2e3,
        z in -2e3f64..2e3,
    ) {
        let axes = vec![
            Axis::from_edges(a).unwrap(),
            Axis::from_edges(b).unwrap(),
            Axis::from_edges(c).unwrap(),
        ];
        let h: Histogram = Histogram::new(axes.clone()).unwrap();
        let joined = h
            .join_index((axes[0].find_bin_index(x), axes[1].find_bin_index(y), axes[2].find_bin_index(z)))
            .unwrap();
        prop_assert_eq!(h.find_bin_index((x, y, z)).unwrap(), joined);
        prop_assert_eq!(h.split_index(joined).unwrap(), h.find_bin_indices([x, y, z]).unwrap());
    }

    #[test]
    fn prop_fill_touches_one_bin(
        a in edges_strategy(),
        b in edges_strategy(),
        x in -2e3f64..2e3,
        y in -2e3f64..2e3,
        w in -5.0f64..5.0,
    ) {
        let mut h: Histogram = Histogram::new(vec![Axis::from_edges(a).unwrap(), Axis::from_edges(b).unwrap()]).unwrap();
        h.fill((x, y)).unwrap();
        let before: Vec<f64> = h.bins().to_vec();
        h.fill_with((x, y), w).unwrap();

        let target = h.join_index(h.find_bin_indices((x, y)).unwrap()).unwrap();
        for (i, (&now, &was)) in h.bins().iter().zip(&before).enumerate() {
            if i == target {
                prop_assert_eq!(now, was + w);
            } else {
                prop_assert_eq!(now, was);
            }
        }
    }
}
