//! Vietoris-Rips Filtration
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! The filtration value of a simplex is the length of its longest edge.
//! Simplices are produced by clique expansion over the ε-neighbourhood
//! graph, truncated at `max_epsilon` and at dimension `max_dim + 1`
//! (the highest dimension needed to kill classes in degree `max_dim`).

use ndarray::Array2;

/// A simplex together with the filtration value where it appears
#[derive(Debug, Clone, PartialEq)]
pub struct Simplex {
    /// Vertex indices, strictly increasing
    pub vertices: Vec<usize>,
    /// Filtration value (longest edge, 0 for vertices)
    pub birth: f64,
}

impl Simplex {
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }
}

/// Vietoris-Rips filtration builder
#[derive(Debug, Clone)]
pub struct VietorisRips {
    /// Distance matrix (precomputed)
    distances: Array2<f64>,
    /// Maximum filtration value
    max_epsilon: f64,
    /// Highest homological degree of interest
    max_dim: usize,
}

impl VietorisRips {
    /// Create a filtration from a precomputed distance matrix
    pub fn new(distances: Array2<f64>, max_epsilon: f64, max_dim: usize) -> Self {
        Self {
            distances,
            max_epsilon,
            max_dim,
        }
    }

    /// Create from point cloud (one point per row)
    pub fn from_points(points: &Array2<f64>, max_epsilon: f64, max_dim: usize) -> Self {
        Self::new(distance_matrix(points), max_epsilon, max_dim)
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    pub fn max_epsilon(&self) -> f64 {
        self.max_epsilon
    }

    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    pub fn distances(&self) -> &Array2<f64> {
        &self.distances
    }

    /// All simplices up to dimension `max_dim + 1`, sorted by
    /// (birth, dimension, vertices)
    pub fn filtration(&self) -> Vec<Simplex> {
        let n = self.n_points();
        let mut simplices = Vec::new();
        let mut current = Vec::with_capacity(self.max_dim + 2);

        for v in 0..n {
            let upper: Vec<usize> = (v + 1..n)
                .filter(|&w| self.distances[[v, w]] <= self.max_epsilon)
                .collect();
            current.push(v);
            self.expand(&mut current, &upper, 0.0, &mut simplices);
            current.pop();
        }

        simplices.sort_by(|a, b| {
            a.birth
                .total_cmp(&b.birth)
                .then(a.dimension().cmp(&b.dimension()))
                .then_with(|| a.vertices.cmp(&b.vertices))
        });
        simplices
    }

    /// Emit `simplex` and recurse into its cofaces.
    ///
    /// `candidates` are the vertices greater than every vertex of `simplex`
    /// that are within `max_epsilon` of all of them.
    fn expand(&self, simplex: &mut Vec<usize>, candidates: &[usize], birth: f64, out: &mut Vec<Simplex>) {
        out.push(Simplex {
            vertices: simplex.clone(),
            birth,
        });

        if simplex.len() >= self.max_dim + 2 {
            return;
        }

        for (idx, &v) in candidates.iter().enumerate() {
            let coface_birth = simplex
                .iter()
                .fold(birth, |acc, &u| acc.max(self.distances[[u, v]]));
            let next: Vec<usize> = candidates[idx + 1..]
                .iter()
                .copied()
                .filter(|&w| self.distances[[v, w]] <= self.max_epsilon)
                .collect();

            simplex.push(v);
            self.expand(simplex, &next, coface_birth, out);
            simplex.pop();
        }
    }
}

/// Euclidean distance matrix of a point cloud (one point per row)
pub fn distance_matrix(points: &Array2<f64>) -> Array2<f64> {
    let n = points.nrows();
    let mut dm = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in i + 1..n {
            let dist = points
                .row(i)
                .iter()
                .zip(points.row(j).iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            dm[[i, j]] = dist;
            dm[[j, i]] = dist;
        }
    }

    dm
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_triangle_filtration() {
        // Equilateral triangle with side 1
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.75_f64.sqrt()]];

        let vr = VietorisRips::from_points(&points, 2.0, 1);
        let filtration = vr.filtration();

        // 3 vertices, 3 edges, 1 triangle
        assert_eq!(filtration.len(), 7);
        assert_eq!(filtration.iter().filter(|s| s.dimension() == 2).count(), 1);

        // Vertices come first, the triangle last
        assert!(filtration[..3].iter().all(|s| s.dimension() == 0));
        let last = filtration.last().unwrap();
        assert_eq!(last.vertices, vec![0, 1, 2]);
        assert!((last.birth - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_epsilon_truncation() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [10.0, 0.0]];

        let vr = VietorisRips::from_points(&points, 2.0, 1);
        let edges: Vec<_> = vr
            .filtration()
            .into_iter()
            .filter(|s| s.dimension() == 1)
            .collect();

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].vertices, vec![0, 1]);
    }

    #[test]
    fn test_dimension_cap() {
        // Regular tetrahedron: max_dim = 0 stops at edges
        let points = array![
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0]
        ];

        let vr = VietorisRips::from_points(&points, 10.0, 0);
        let max_dim = vr.filtration().iter().map(Simplex::dimension).max();
        assert_eq!(max_dim, Some(1));

        let vr = VietorisRips::from_points(&points, 10.0, 2);
        let tetrahedra = vr.filtration().iter().filter(|s| s.dimension() == 3).count();
        assert_eq!(tetrahedra, 1);
    }

    #[test]
    fn test_distance_matrix_symmetric() {
        let points = array![[0.0, 0.0], [3.0, 4.0]];
        let dm = distance_matrix(&points);
        assert_eq!(dm[[0, 1]], 5.0);
        assert_eq!(dm[[1, 0]], 5.0);
        assert_eq!(dm[[0, 0]], 0.0);
    }
}
