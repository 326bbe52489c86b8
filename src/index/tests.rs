//! Tests for shapes and strided index cursors.

use super::*;

#[test]
fn shape_reports_rank_and_size() {
    let shape = Shape::new(&[3, 4, 5]);
    assert_eq!(shape.rank(), 3);
    assert_eq!(shape.size(), 60);
    assert_eq!(shape.dims(), &[3, 4, 5]);
}

#[test]
fn shape_with_zero_dimension_holds_no_elements() {
    let shape = Shape::new(&[3, 0, 5]);
    assert_eq!(shape.size(), 0);
}

#[test]
fn scalar_shape_has_one_element() {
    let shape = Shape::scalar();
    assert_eq!(shape.rank(), 0);
    assert_eq!(shape.size(), 1);
    assert!(shape.is_scalar());
}

#[test]
fn row_major_strides_are_products_of_trailing_sizes() {
    assert_eq!(row_major_strides(&[4, 4, 4]).as_slice(), &[16, 4, 1]);
    assert_eq!(row_major_strides(&[2, 3]).as_slice(), &[3, 1]);
    assert_eq!(row_major_strides(&[7]).as_slice(), &[1]);
}

#[test]
fn index_picks_rank_specialization() {
    assert!(matches!(Index::new(&Shape::scalar()), Index::D0(_)));
    assert!(matches!(Index::new(&Shape::vector(5)), Index::D1(_)));
    assert!(matches!(Index::new(&Shape::new(&[2, 3])), Index::D2(_)));
    assert!(matches!(Index::new(&Shape::new(&[2, 3, 4])), Index::D3(_)));
    assert!(matches!(
        Index::new(&Shape::new(&[2, 3, 4, 5, 6])),
        Index::Dn(_)
    ));
}

#[test]
fn offset_of_matches_row_major_layout() {
    let ix = Index::new(&Shape::new(&[2, 3, 4]));
    assert_eq!(ix.offset_of(&[0, 0, 0]).unwrap(), 0);
    assert_eq!(ix.offset_of(&[0, 0, 3]).unwrap(), 3);
    assert_eq!(ix.offset_of(&[0, 1, 0]).unwrap(), 4);
    assert_eq!(ix.offset_of(&[1, 2, 3]).unwrap(), 23);
}

#[test]
fn offset_of_rejects_out_of_range_coordinate() {
    let ix = Index::new(&Shape::new(&[2, 3]));
    let err = ix.offset_of(&[0, 3]).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn offset_of_rejects_rank_mismatch() {
    let ix = Index::new(&Shape::new(&[2, 3]));
    assert!(ix.offset_of(&[1]).is_err());
}

#[test]
fn specialized_and_general_offsets_agree() {
    let shapes: &[&[usize]] = &[&[], &[7], &[3, 4], &[2, 3, 4], &[2, 2, 2, 2], &[3, 1, 2, 1, 2]];
    for dims in shapes {
        let shape = Shape::new(dims);
        let fast = Index::new(&shape);
        let general = Index::general(&shape);

        // Walk every coordinate of the shape and compare both paths.
        let mut coord = vec![0usize; shape.rank()];
        for _ in 0..shape.size() {
            assert_eq!(
                fast.offset_of(&coord).unwrap(),
                general.offset_of(&coord).unwrap(),
                "shape {:?} coord {:?}",
                dims,
                coord
            );
            for d in (0..shape.rank()).rev() {
                coord[d] += 1;
                if coord[d] < shape.dim(d) {
                    break;
                }
                coord[d] = 0;
            }
        }
    }
}

#[test]
fn increment_walks_row_major_order() {
    let mut ix = Index::new(&Shape::new(&[2, 3]));
    assert_eq!(ix.current_offset(), 0);
    let mut offsets = vec![ix.current_offset()];
    while let Some(off) = ix.increment() {
        offsets.push(off);
    }
    assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5]);
    // Further increments keep reporting exhaustion.
    assert_eq!(ix.increment(), None);
}

#[test]
fn general_increment_matches_specialized_walk() {
    let shape = Shape::new(&[2, 2, 3]);
    let mut fast = Index::new(&shape);
    let mut general = Index::general(&shape);
    loop {
        let a = fast.increment();
        let b = general.increment();
        assert_eq!(a, b);
        if a.is_none() {
            break;
        }
    }
}

#[test]
fn rank1_increment_wraps_to_first_element() {
    let mut ix = Index::new(&Shape::vector(3));
    assert_eq!(ix.increment(), Some(1));
    assert_eq!(ix.increment(), Some(2));
    // Past the last element the rank-1 cursor wraps instead of finishing.
    assert_eq!(ix.increment(), Some(0));
    assert_eq!(ix.increment(), Some(1));
}

#[test]
fn rank1_increment_over_empty_dimension_reports_exhaustion() {
    let mut ix = Index::new(&Shape::vector(0));
    assert_eq!(ix.increment(), None);
}

#[test]
fn set_moves_the_cursor() {
    let mut ix = Index::new(&Shape::new(&[4, 5]));
    ix.set(0, 2).unwrap();
    ix.set(1, 3).unwrap();
    assert_eq!(ix.current_offset(), 13);
    assert_eq!(ix.coords().as_slice(), &[2, 3]);
}

#[test]
fn set_rejects_out_of_range_value() {
    let mut ix = Index::new(&Shape::new(&[4, 5]));
    let err = ix.set(1, 5).unwrap_err();
    assert!(err.to_string().contains("out of range"));
    let err = ix.set(2, 0).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn set_coords_positions_all_dimensions() {
    let mut ix = Index::new(&Shape::new(&[2, 3, 4]));
    ix.set_coords(&[1, 2, 3]).unwrap();
    assert_eq!(ix.current_offset(), 23);
}

#[test]
fn set_revives_a_finished_cursor() {
    let mut ix = Index::new(&Shape::new(&[2, 2]));
    while ix.increment().is_some() {}
    assert_eq!(ix.increment(), None);
    ix.set(0, 1).unwrap();
    ix.set(1, 0).unwrap();
    assert_eq!(ix.increment(), Some(3));
}

#[test]
fn reset_rewinds_to_origin() {
    let mut ix = Index::new(&Shape::new(&[2, 3]));
    while ix.increment().is_some() {}
    ix.reset();
    assert_eq!(ix.current_offset(), 0);
    assert_eq!(ix.increment(), Some(1));
}

#[test]
fn cloned_cursor_advances_independently() {
    let mut a = Index::new(&Shape::new(&[3, 3]));
    a.increment();
    let mut b = a.clone();
    b.increment();
    assert_eq!(a.current_offset(), 1);
    assert_eq!(b.current_offset(), 2);
}

#[test]
fn with_layout_applies_custom_strides_and_base() {
    // A 2x2 window into a larger row-major array of width 8, starting at 10.
    let ix = Index::with_layout(&Shape::new(&[2, 2]), &[8, 1], 10).unwrap();
    assert_eq!(ix.offset_of(&[0, 0]).unwrap(), 10);
    assert_eq!(ix.offset_of(&[0, 1]).unwrap(), 11);
    assert_eq!(ix.offset_of(&[1, 0]).unwrap(), 18);
    assert_eq!(ix.offset_of(&[1, 1]).unwrap(), 19);
}

#[test]
fn with_layout_rejects_rank_mismatch() {
    let err = Index::with_layout(&Shape::new(&[2, 2]), &[1], 0).unwrap_err();
    assert!(err.to_string().contains("does not match"));
}
