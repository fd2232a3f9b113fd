/// Sum of all order totals
pub fn total(orders: &[Vec<u64>]) -> u64 {
    let mut sum = 0;
    for order in orders {
        let copy = order.clone();
        sum += copy.iter().sum::<u64>();
    }
    sum
}
