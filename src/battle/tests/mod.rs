pub mod common;

#[cfg(test)]
mod test_attack_flow;





#[cfg(test)]
mod test_escape;
