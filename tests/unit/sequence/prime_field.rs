use super::*;

fn drain(seq: &mut PrimeFieldSequence) -> Vec<u64> {
    let mut out = Vec::new();
    while let Some(i) = seq.next_index() {
        out.push(i);
    }
    out
}

#[test]
fn root_generates_the_whole_group() {
    let mut k = 1u64;
    let mut steps = 0u64;
    loop {
        k = (k * PRIMITIVE_ROOT) % PRIME;
        steps += 1;
        if k == 1 {
            break;
        }
    }
    assert_eq!(steps, PRIME - 1);
}

#[test]
fn small_orders_match_reference_walk() {
    let domain = Domain::new(2, 2).unwrap();
    assert_eq!(
        drain(&mut PrimeFieldSequence::new(domain, 0).unwrap()),
        vec![0, 2, 3, 1]
    );
    assert_eq!(
        drain(&mut PrimeFieldSequence::new(domain, 4).unwrap()),
        vec![1, 0, 2, 3]
    );
}

#[test]
fn covers_domains_larger_than_the_prime() {
    let domain = Domain::new(300, 300).unwrap();
    let mut drawn = drain(&mut PrimeFieldSequence::new(domain, 1234).unwrap());
    assert_eq!(drawn.len(), 90_000);
    drawn.sort_unstable();
    assert!(drawn.iter().enumerate().all(|(i, &v)| v == i as u64));
}

#[test]
fn pixel_zero_is_revealed() {
    let domain = Domain::new(1, 1).unwrap();
    let mut seq = PrimeFieldSequence::new(domain, 99).unwrap();
    assert_eq!(seq.next_index(), Some(0));
    assert_eq!(seq.next_index(), None);
    assert_eq!(seq.start_k(), 100);
    assert_eq!(seq.row_stride(), 1);
}
