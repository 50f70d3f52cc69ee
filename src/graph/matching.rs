use super::Weight;
use crate::{Error, Result};

/// Largest vertex set the matching table can be built for.
///
/// The table has `2^k` entries, so anything bigger would take gigabytes.
pub const MAX_ODD_VERTICES: usize = 24;

/// A perfect matching over indices into the matched vertex set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matching<W> {
    /// Each pair is `(i, j)` with `i < j`
    pub pairs: Vec<(usize, usize)>,
    pub cost: W,
}

impl<W: Weight> Matching<W> {
    pub fn empty() -> Self {
        Self {
            pairs: vec![],
            cost: W::zero(),
        }
    }

    /// Partner of every vertex, i.e. `mates[i] == j` and `mates[j] == i` for each pair
    pub fn mates(&self) -> Vec<usize> {
        let mut mates = vec![0; self.pairs.len() * 2];
        for &(i, j) in &self.pairs {
            mates[i] = j;
            mates[j] = i;
        }
        mates
    }
}

/// Find a minimum-weight perfect matching for `k` vertices given their pairwise `distances` (a symmetric `k x k` matrix)
/// with bitmask dynamic programming in O(2^k k) time and O(2^k) space.
///
/// A mask marks the vertices already paired. The cheapest completion of a mask pairs its lowest unpaired vertex
/// with some other unpaired vertex, so only that vertex's choices need to be tried. The table is filled from the
/// full mask down to the empty one, as every transition sets bits and lands on a larger mask.
///
/// A completion whose cost overflows `W` is treated as infinitely expensive. Only when every perfect matching
/// overflows is [Error::WeightOverflow] returned.
pub fn minimum_weight_perfect_matching<W: Weight>(distances: &[Vec<W>]) -> Result<Matching<W>> {
    let k = distances.len();
    if k == 0 {
        return Ok(Matching::empty());
    }
    if k % 2 == 1 {
        return Err(Error::structural(format!(
            "cannot perfectly match an odd number of vertices ({k})"
        )));
    }
    if k > MAX_ODD_VERTICES {
        return Err(Error::Intractable {
            odd_vertices: k,
            ceiling: MAX_ODD_VERTICES,
        });
    }
    if let Some(row) = distances.iter().position(|row| row.len() != k) {
        return Err(Error::structural(format!(
            "distance row {row} has {} entries, expected {k}",
            distances[row].len()
        )));
    }

    let full = (1usize << k) - 1;
    // Cheapest way to pair up every vertex not in the mask
    let mut completion: Vec<Option<W>> = vec![None; full + 1];
    // Partner chosen for the lowest unpaired vertex of the mask
    let mut partner = vec![0u8; full + 1];
    completion[full] = Some(W::zero());

    for mask in (0..full).rev() {
        // Pairs are added two bits at a time starting from the empty mask
        if mask.count_ones() % 2 == 1 {
            continue;
        }
        let first = mask.trailing_ones() as usize;
        let with_first = mask | (1 << first);

        let mut best: Option<(W, usize)> = None;
        for second in first + 1..k {
            if with_first & (1 << second) != 0 {
                continue;
            }
            let Some(rest) = completion[with_first | (1 << second)] else {
                continue;
            };
            let Some(candidate) = distances[first][second].checked_add(&rest) else {
                continue;
            };
            if best.map_or(true, |(best_cost, _)| candidate < best_cost) {
                best = Some((candidate, second));
            }
        }
        if let Some((cost, second)) = best {
            completion[mask] = Some(cost);
            partner[mask] = second as u8;
        }
    }

    // Every mask has some pairing, so an empty entry means all of them overflowed
    let cost = completion[0].ok_or(Error::WeightOverflow)?;
    let mut pairs = Vec::with_capacity(k / 2);
    let mut mask = 0usize;
    while mask != full {
        let first = mask.trailing_ones() as usize;
        let second = partner[mask] as usize;
        pairs.push((first, second));
        mask |= (1 << first) | (1 << second);
    }

    Ok(Matching { pairs, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Every perfect matching of `remaining`, by pairing its first vertex with each other one
    fn all_perfect_matchings(remaining: &[usize]) -> Vec<Vec<(usize, usize)>> {
        let Some((&first, rest)) = remaining.split_first() else {
            return vec![vec![]];
        };
        let mut matchings = vec![];
        for (i, &second) in rest.iter().enumerate() {
            let others = rest
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, v)| *v)
                .collect::<Vec<_>>();
            for mut matching in all_perfect_matchings(&others) {
                matching.push((first, second));
                matchings.push(matching);
            }
        }
        matchings
    }

    fn cost_of(distances: &[Vec<u64>], pairs: &[(usize, usize)]) -> u64 {
        pairs.iter().map(|(i, j)| distances[*i][*j]).sum()
    }

    fn random_distances(rng: &mut StdRng, k: usize) -> Vec<Vec<u64>> {
        let mut distances = vec![vec![0; k]; k];
        for i in 0..k {
            for j in i + 1..k {
                let d = rng.gen_range(1..50);
                distances[i][j] = d;
                distances[j][i] = d;
            }
        }
        distances
    }

    #[test]
    fn empty_set_needs_no_pairs() {
        let matching = minimum_weight_perfect_matching::<u32>(&[]).unwrap();
        assert_eq!(matching, Matching::empty());
        assert!(matching.mates().is_empty());
    }

    #[test]
    fn two_vertices_pair_with_each_other() {
        let matching = minimum_weight_perfect_matching(&[vec![0u32, 2], vec![2, 0]]).unwrap();
        assert_eq!(
            matching,
            Matching {
                pairs: vec![(0, 1)],
                cost: 2
            }
        );
        assert_eq!(matching.mates(), vec![1, 0]);
    }

    #[test]
    fn four_vertices_pick_cheapest_pairing() {
        // 0-1 and 2-3 are cheap, the crossings are expensive
        let distances = vec![
            vec![0u32, 1, 9, 9],
            vec![1, 0, 9, 9],
            vec![9, 9, 0, 2],
            vec![9, 9, 2, 0],
        ];
        let matching = minimum_weight_perfect_matching(&distances).unwrap();
        assert_eq!(matching.pairs, vec![(0, 1), (2, 3)]);
        assert_eq!(matching.cost, 3);
        assert_eq!(matching.mates(), vec![1, 0, 3, 2]);
    }

    #[test]
    fn matching_is_minimal_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for k in (2..=10).step_by(2) {
            for _ in 0..10 {
                let distances = random_distances(&mut rng, k);
                let matching = minimum_weight_perfect_matching(&distances).unwrap();

                let vertices = (0..k).collect::<Vec<_>>();
                let best = all_perfect_matchings(&vertices)
                    .iter()
                    .map(|pairs| cost_of(&distances, pairs))
                    .min()
                    .unwrap();
                assert_eq!(matching.cost, best);
                assert_eq!(cost_of(&distances, &matching.pairs), matching.cost);

                let mut covered = matching
                    .pairs
                    .iter()
                    .flat_map(|(i, j)| [*i, *j])
                    .collect::<Vec<_>>();
                covered.sort_unstable();
                assert_eq!(covered, vertices);
                assert!(matching.pairs.iter().all(|(i, j)| i < j));
            }
        }
    }

    #[test]
    fn odd_vertex_count_is_a_bug() {
        let distances = vec![vec![0u32; 3]; 3];
        assert!(matches!(
            minimum_weight_perfect_matching(&distances),
            Err(Error::Structural(_))
        ));
    }

    #[test]
    fn oversized_set_is_intractable() {
        let k = MAX_ODD_VERTICES + 2;
        let distances = vec![vec![1u32; k]; k];
        assert_eq!(
            minimum_weight_perfect_matching(&distances),
            Err(Error::Intractable {
                odd_vertices: k,
                ceiling: MAX_ODD_VERTICES
            })
        );
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let distances = vec![vec![0u32, 1], vec![1]];
        assert!(matches!(
            minimum_weight_perfect_matching(&distances),
            Err(Error::Structural(_))
        ));
    }

    #[test]
    fn overflowing_pairings_are_skipped() {
        let distances = vec![
            vec![0u8, 200, 1, 1],
            vec![200, 0, 1, 1],
            vec![1, 1, 0, 200],
            vec![1, 1, 200, 0],
        ];
        // 0-1 + 2-3 costs 400, which doesn't fit in a u8, but it isn't the cheapest anyway
        assert_eq!(
            minimum_weight_perfect_matching(&distances),
            Ok(Matching {
                pairs: vec![(0, 2), (1, 3)],
                cost: 2
            })
        );
    }

    #[test]
    fn overflow_is_reported_when_every_pairing_overflows() {
        let distances = vec![
            vec![0u8, 200, 200, 200],
            vec![200, 0, 200, 200],
            vec![200, 200, 0, 200],
            vec![200, 200, 200, 0],
        ];
        assert_eq!(
            minimum_weight_perfect_matching(&distances),
            Err(Error::WeightOverflow)
        );
    }
}
