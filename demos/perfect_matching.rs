//! SAT formulation deciding whether a graph has a perfect matching.
//!
//! A perfect matching picks a set of edges such that no two picked edges
//! share a vertex and every vertex is covered. The symbol `p(u, w)` states
//! that the edge uw is in the matching; the formula conjoins "every vertex
//! is covered by some picked edge" with "no vertex is covered twice".

use mantra::prelude::*;

fn touches_vertex(ctx: &Context, edge: &Tuple) -> bool {
    match ctx.lookup("v") {
        Some(v) => edge.contains(v),
        None => true,
    }
}

fn other_incident_edge(ctx: &Context, edge: &Tuple) -> bool {
    let (v, u, w) = match (ctx.lookup("v"), ctx.lookup("u"), ctx.lookup("w")) {
        (Some(v), Some(u), Some(w)) => (v, u, w),
        _ => return true,
    };
    edge.contains(v) && !(edge.contains(u) && edge.contains(w))
}

fn perfect_matching(vertices: &[i64], edges: &[(i64, i64)]) -> Result<String> {
    let mut registry = Registry::new();
    registry.build("p", 2, edges.iter().copied())?;

    // Every vertex is covered: for each v there is an incident edge uw in
    // the matching.
    let covered = Quantifier::forall(["v"], to_tuple_iter(vertices.iter().copied()))
        .chain(Quantifier::exists_where(
            ["u", "w"],
            edges.iter().copied(),
            require_vars(["v"], OnMissing::Error, touches_vertex),
        ))?
        .chain(Quantifier::atoms(&registry, ["p(u, w)"])?)?;

    // No vertex is covered twice: for each v and each pair of distinct
    // incident edges, at least one of the two stays out of the matching.
    let exclusive = Quantifier::forall(["v"], to_tuple_iter(vertices.iter().copied()))
        .chain(Quantifier::forall_where(
            ["u", "w"],
            edges.iter().copied(),
            require_vars(["v"], OnMissing::Error, touches_vertex),
        ))?
        .chain(Quantifier::forall_where(
            ["r", "s"],
            edges.iter().copied(),
            require_vars(["v", "u", "w"], OnMissing::Error, other_incident_edge),
        ))?
        .chain(Quantifier::atoms(&registry, ["-p(u,w)", "-p(r,s)"])?)?;

    let cnf = covered
        .evaluate(&registry)?
        .join(exclusive.evaluate(&registry)?);
    Ok(cnf.to_dimacs_commented("perfect matching"))
}

fn main() -> Result<()> {
    let vertices = [1, 2, 3, 4];
    let edges = [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)];
    print!("{}", perfect_matching(&vertices, &edges)?);
    Ok(())
}
