//! Stories loaded into the simulator.

pub const STORIES: [&str; 5] = [
    "The lighthouse keeper counted the ships as they passed. Forty-one on a calm night, \
     nine in a storm.\nShe wrote every name in the ledger and never once saw a ship come back.",
    "Somewhere past the orbit of Neptune a probe woke up, checked its clock, and found it \
     had been asleep for eleven years.\nIt sent one word home: still here.",
    "The baker on Mill Street opens at four. By five the queue reaches the corner.\n\
     Nobody remembers a day he was late.",
    "Rain again. The cat watches the window like it owes her money.",
    "They built the bridge in a single summer.\nA hundred years later it still hums when \
     the wind comes off the river, and the children say it is singing.",
];
