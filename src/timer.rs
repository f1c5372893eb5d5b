use std::time::Instant;

pub struct Timer{
    last: Instant,
}

impl Timer{
    pub fn new() -> Self{
        Self{ last: Instant::now() }
    }

    pub fn lap(&mut self) -> u128{
        let now = Instant::now();
        let ms = now.duration_since(self.last).as_millis();
        self.last = now;
        ms
    }
}
